//! Browser-side glue for the core's time abstraction.

use relief_core::Clock;
use std::time::Duration;

/// Wall clock backed by `Date.now()`; `std::time::Instant` is unavailable in the browser.
pub struct BrowserClock {
    origin_ms: f64,
}

impl BrowserClock {
    pub fn new() -> Self {
        Self {
            origin_ms: js_sys::Date::now(),
        }
    }
}

impl Default for BrowserClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        let elapsed_ms = (js_sys::Date::now() - self.origin_ms).max(0.0);
        Duration::from_secs_f64(elapsed_ms / 1000.0)
    }
}

/// Current local time of day in US English, e.g. "3:04:05 PM".
pub fn local_time_string() -> String {
    js_sys::Date::new_0().to_locale_time_string("en-US").into()
}
