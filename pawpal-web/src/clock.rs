use pawpal_game::Clock;
use pawpal_game::numbers::f64_to_epoch_ms;

/// Wall clock backed by `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn now_ms(&self) -> i64 {
        f64_to_epoch_ms(js_sys::Date::now())
    }
}

/// Seed for default-name picks, mixed from the clock and `Math.random()`.
#[must_use]
pub fn entropy_seed() -> u64 {
    let now = f64_to_epoch_ms(js_sys::Date::now()).unsigned_abs();
    let noise = f64_to_epoch_ms(js_sys::Math::random() * 9_007_199_254_740_991.0).unsigned_abs();
    now.rotate_left(21) ^ noise
}
