//! Time helpers
//!
//! All timestamps in the database are epoch milliseconds (i64).

use chrono::Utc;

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whether `now` falls inside an optional [from, until) window
///
/// An unset bound is open-ended.
pub fn within_window(now: i64, from: Option<i64>, until: Option<i64>) -> bool {
    if let Some(f) = from
        && now < f
    {
        return false;
    }
    if let Some(u) = until
        && now >= u
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_window() {
        assert!(within_window(100, None, None));
        assert!(within_window(100, Some(100), None));
        assert!(!within_window(99, Some(100), None));
        assert!(within_window(99, None, Some(100)));
        assert!(!within_window(100, None, Some(100)));
        assert!(within_window(150, Some(100), Some(200)));
    }
}
