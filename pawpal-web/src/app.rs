//! JavaScript-facing entry point. The page constructs one [`PawpalApp`],
//! wires its buttons to the intent methods, and receives render views and
//! notices through the callbacks it passed in.
use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::str::FromStr;

use js_sys::Function;
use pawpal_game::{Intent, IntentOutcome, PetTuning, SessionController, Species, TimerKind};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::clock::{WebClock, entropy_seed};
use crate::dom;
use crate::keys::intent_for_key;
use crate::storage::WebPetStorage;
use crate::ticker::WebTicker;
use crate::view::JsView;

pub type WebSession = SessionController<WebPetStorage, WebClock, WebTicker, JsView>;

pub const RESET_PROMPT: &str =
    "Are you sure you want to start with a new pet? This will delete your current pet.";

/// Entry on the species-selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesOption {
    pub id: &'static str,
    pub badge: &'static str,
}

#[must_use]
pub fn species_options() -> Vec<SpeciesOption> {
    Species::ALL
        .iter()
        .map(|species| SpeciesOption {
            id: species.as_str(),
            badge: species.badge(),
        })
        .collect()
}

#[wasm_bindgen]
pub struct PawpalApp {
    session: Rc<RefCell<WebSession>>,
}

#[wasm_bindgen]
impl PawpalApp {
    /// `on_render(view)`, `on_notify(notice)` and `on_select()` are called
    /// whenever the pet changes, a banner should show, or no pet exists.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(on_render: Function, on_notify: Function, on_select: Function) -> Self {
        let view = JsView::new(on_render, on_notify, on_select);
        let session = Rc::new_cyclic(|weak: &Weak<RefCell<WebSession>>| {
            let weak = weak.clone();
            let ticker = WebTicker::new(move |kind| fire(&weak, kind));
            RefCell::new(SessionController::new(
                WebPetStorage,
                WebClock,
                ticker,
                view,
                PetTuning::default_config(),
                entropy_seed(),
            ))
        });
        Self { session }
    }

    /// Start the autosave schedule and resume a saved pet if there is one.
    ///
    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    pub fn boot(&self) -> Result<bool, JsValue> {
        Ok(self.session()?.boot())
    }

    /// # Errors
    /// Returns an error for an unknown species id or a re-entrant call.
    #[wasm_bindgen(js_name = selectSpecies)]
    pub fn select_species(&self, species: &str, name: Option<String>) -> Result<JsValue, JsValue> {
        let species = Species::from_str(species)
            .map_err(|()| JsValue::from_str(&format!("unknown species: {species}")))?;
        self.run(Intent::SelectSpecies { species, name })
    }

    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    pub fn feed(&self) -> Result<JsValue, JsValue> {
        self.run(Intent::Feed)
    }

    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    pub fn play(&self) -> Result<JsValue, JsValue> {
        self.run(Intent::Play)
    }

    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    #[wasm_bindgen(js_name = toggleSleep)]
    pub fn toggle_sleep(&self) -> Result<JsValue, JsValue> {
        self.run(Intent::ToggleSleep)
    }

    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    #[wasm_bindgen(js_name = petClicked)]
    pub fn pet_clicked(&self) -> Result<JsValue, JsValue> {
        self.run(Intent::PetClicked)
    }

    /// Feed a `keydown` key through the hidden shortcuts. Returns `null`
    /// when the key is not a shortcut or there is no pet.
    ///
    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    #[wasm_bindgen(js_name = keyPressed)]
    pub fn key_pressed(&self, key: &str) -> Result<JsValue, JsValue> {
        let Some(intent) = intent_for_key(key) else {
            return Ok(JsValue::NULL);
        };
        if !self.session()?.has_pet() {
            return Ok(JsValue::NULL);
        }
        self.run(intent)
    }

    /// Ask for confirmation, then discard the pet and its save.
    ///
    /// # Errors
    /// Returns an error if called re-entrantly from a callback.
    pub fn reset(&self) -> Result<JsValue, JsValue> {
        let confirmed = dom::confirm(RESET_PROMPT);
        self.run(Intent::Reset { confirmed })
    }

    /// Dispatch an intent given as a tagged object, e.g. `{ type: "feed" }`.
    ///
    /// # Errors
    /// Returns an error if the object is not a known intent.
    pub fn dispatch(&self, intent: JsValue) -> Result<JsValue, JsValue> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent)?;
        self.run(intent)
    }

    /// Current render view, or `null` without a pet.
    ///
    /// # Errors
    /// Returns an error if the view cannot be encoded.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = self.session()?.render_view();
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// Species ids and badge glyphs for the selection screen.
    ///
    /// # Errors
    /// Returns an error if the list cannot be encoded.
    #[wasm_bindgen(js_name = speciesOptions)]
    pub fn species_options_js() -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&species_options())?)
    }
}

impl PawpalApp {
    fn session(&self) -> Result<RefMut<'_, WebSession>, JsValue> {
        self.session
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("pawpal session is busy"))
    }

    fn run(&self, intent: Intent) -> Result<JsValue, JsValue> {
        let outcome: IntentOutcome = self.session()?.dispatch(intent);
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }
}

fn fire(session: &Weak<RefCell<WebSession>>, kind: TimerKind) {
    let Some(session) = session.upgrade() else {
        return;
    };
    match session.try_borrow_mut() {
        Ok(mut session) => session.on_timer(kind),
        Err(_) => log::warn!("{kind:?} timer fired during another update; skipped"),
    }
}
