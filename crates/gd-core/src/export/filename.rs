//! Export filenames
//!
//! Files are named `<prefix>-<period>-<epoch-ms>.<ext>`. The millisecond
//! stamp comes from a [`FilenameClock`], which never hands out the same
//! value twice so back-to-back exports cannot collide.

use crate::types::ReportPeriod;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Prefix used by the admin dashboard export
pub const DEFAULT_PREFIX: &str = "admin-report";

/// Build an export filename
pub fn build_filename(prefix: &str, period: ReportPeriod, epoch_millis: i64, extension: &str) -> String {
    format!("{}-{}-{}.{}", prefix, period, epoch_millis, extension)
}

/// Strictly increasing millisecond clock
#[derive(Debug, Default)]
pub struct FilenameClock {
    last: AtomicI64,
}

impl FilenameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next epoch-millisecond value, at least one past the previous one
    pub fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Next stamp as a UTC timestamp
    pub fn next_stamp(&self) -> DateTime<Utc> {
        let millis = self.next_millis();
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_build_filename() {
        assert_eq!(
            build_filename("admin-report", ReportPeriod::Month, 1734652800000, "csv"),
            "admin-report-month-1734652800000.csv"
        );
    }

    #[test]
    fn test_clock_is_strictly_increasing() {
        let clock = FilenameClock::new();
        let mut prev = clock.next_millis();
        for _ in 0..1000 {
            let next = clock.next_millis();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_clock_tracks_wall_time() {
        let clock = FilenameClock::new();
        let before = Utc::now().timestamp_millis();
        assert!(clock.next_millis() >= before);
    }

    #[test]
    fn test_clock_unique_across_threads() {
        let clock = Arc::new(FilenameClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || (0..250).map(|_| clock.next_millis()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for millis in handle.join().unwrap() {
                assert!(seen.insert(millis));
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
