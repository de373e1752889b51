use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use pawpal_game::{Ticker, TimerKind};

/// `setInterval`-backed schedules. Dropping an [`Interval`] cancels it, so
/// stopping a schedule is just removing its handle.
pub struct WebTicker {
    intervals: BTreeMap<TimerKind, Interval>,
    on_fire: Rc<dyn Fn(TimerKind)>,
}

impl WebTicker {
    pub fn new(on_fire: impl Fn(TimerKind) + 'static) -> Self {
        Self {
            intervals: BTreeMap::new(),
            on_fire: Rc::new(on_fire),
        }
    }
}

impl fmt::Debug for WebTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebTicker")
            .field("running", &self.intervals.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Ticker for WebTicker {
    fn start(&mut self, kind: TimerKind, period_ms: u32) {
        let on_fire = Rc::clone(&self.on_fire);
        let interval = Interval::new(period_ms, move || on_fire(kind));
        if self.intervals.insert(kind, interval).is_some() {
            log::debug!("restarted {kind:?} schedule at {period_ms}ms");
        }
    }

    fn stop(&mut self, kind: TimerKind) {
        self.intervals.remove(&kind);
    }

    fn is_running(&self, kind: TimerKind) -> bool {
        self.intervals.contains_key(&kind)
    }
}
