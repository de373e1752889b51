use js_sys::Function;
use pawpal_game::{Notice, PetView, RenderView};
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Forwards render views and notices to page-supplied JavaScript callbacks.
#[derive(Debug, Clone)]
pub struct JsView {
    on_render: Function,
    on_notify: Function,
    on_select: Function,
}

impl JsView {
    #[must_use]
    pub fn new(on_render: Function, on_notify: Function, on_select: Function) -> Self {
        Self {
            on_render,
            on_notify,
            on_select,
        }
    }

    fn send<T: Serialize>(callback: &Function, what: &str, payload: &T) {
        let value = match serde_wasm_bindgen::to_value(payload) {
            Ok(value) => value,
            Err(err) => {
                log::error!("failed to encode {what}: {err}");
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            log::error!("{what} callback threw: {}", js_error_message(&err));
        }
    }
}

impl PetView for JsView {
    fn render(&mut self, view: &RenderView) {
        Self::send(&self.on_render, "render", view);
    }

    fn notify(&mut self, notice: &Notice) {
        Self::send(&self.on_notify, "notice", notice);
    }

    fn show_species_selection(&mut self) {
        if let Err(err) = self.on_select.call0(&JsValue::NULL) {
            log::error!("selection callback threw: {}", js_error_message(&err));
        }
    }
}
