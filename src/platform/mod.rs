//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Local calendar date (daily mission rotation)
//! - Storage backend selection
//! - Browser bindings (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

/// Source of the local calendar date
pub trait Clock {
    /// Local date as `YYYY-MM-DD`
    fn today_key(&self) -> String;
}

/// Format a date key the way the daily mission store expects
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn today_key(&self) -> String {
        use chrono::Datelike;
        let now = chrono::Local::now();
        date_key(now.year(), now.month(), now.day())
    }

    #[cfg(target_arch = "wasm32")]
    fn today_key(&self) -> String {
        let now = js_sys::Date::new_0();
        date_key(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
    }
}

/// Settable clock; clones share the same date
#[derive(Debug, Clone)]
pub struct FixedClock {
    key: Rc<RefCell<String>>,
}

impl FixedClock {
    pub fn new(key: &str) -> Self {
        Self {
            key: Rc::new(RefCell::new(key.to_string())),
        }
    }

    pub fn set(&self, key: &str) {
        *self.key.borrow_mut() = key.to_string();
    }
}

impl Clock for FixedClock {
    fn today_key(&self) -> String {
        self.key.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(2026, 3, 7), "2026-03-07");
        assert_eq!(date_key(2026, 12, 31), "2026-12-31");
    }

    #[test]
    fn test_fixed_clock_clones_share_date() {
        let clock = FixedClock::new("2026-10-19");
        let handle = clock.clone();
        handle.set("2026-10-20");
        assert_eq!(clock.today_key(), "2026-10-20");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_local_clock_shape() {
        let key = LocalClock.today_key();
        assert_eq!(key.len(), 10);
        assert_eq!(&key[4..5], "-");
        assert_eq!(&key[7..8], "-");
    }
}
