//! The birthdate holder shared by the overlay and the tray.

use crate::clock::age::{compute_age, format_age, AgeBreakdown};
use crate::platform::config::{load_birthdate, LoadOutcome};
use chrono::{Local, NaiveDateTime, Timelike};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// System clock in local time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Process-wide "keep going" gate. Starts true, flips to false once.
#[derive(Debug, Clone)]
pub struct RunningFlag(Arc<AtomicBool>);

impl RunningFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag. Returns true only for the call that flipped it.
    pub fn stop(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for RunningFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the birthdate and answers "how old right now".
///
/// Lives on the UI thread; the tray reaches it only through posted actions.
pub struct AgeSource {
    config_path: PathBuf,
    birthdate: NaiveDateTime,
    running: RunningFlag,
    clock: Arc<dyn Clock>,
}

impl AgeSource {
    /// Load the birthdate from `config_path` using the system clock.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self::with_clock(config_path, Arc::new(LocalClock))
    }

    pub fn with_clock(config_path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let config_path = config_path.into();
        let birthdate = load_birthdate(&config_path).birthdate();
        Self {
            config_path,
            birthdate,
            running: RunningFlag::new(),
            clock,
        }
    }

    pub fn birthdate(&self) -> NaiveDateTime {
        self.birthdate
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn running(&self) -> &RunningFlag {
        &self.running
    }

    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Re-read the config and replace the birthdate in one assignment.
    pub fn reload(&mut self) -> LoadOutcome {
        let outcome = load_birthdate(&self.config_path);
        self.birthdate = outcome.birthdate();
        tracing::info!(birthdate = %self.birthdate, "birthdate reloaded");
        outcome
    }

    pub fn current_age(&self) -> AgeBreakdown {
        compute_age(self.birthdate, self.clock.now())
    }

    pub fn current_age_string(&self) -> String {
        format_age(&self.current_age())
    }

    /// Clear the running flag. Idempotent.
    pub fn stop(&self) -> bool {
        self.running.stop()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Clock pinned to a settable instant.
    pub(crate) struct FixedClock(Mutex<NaiveDateTime>);

    impl FixedClock {
        pub(crate) fn new(now: NaiveDateTime) -> Self {
            Self(Mutex::new(now))
        }

        pub(crate) fn set(&self, now: NaiveDateTime) {
            *self.0.lock().unwrap() = now;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    pub(crate) fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn running_flag_flips_once() {
        let flag = RunningFlag::new();
        let shared = flag.clone();
        assert!(flag.is_running());
        assert!(shared.stop());
        assert!(!flag.stop());
        assert!(!flag.is_running());
    }

    #[test]
    fn missing_config_uses_default_birthdate() {
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 0, 0, 0)));
        let source = AgeSource::with_clock("/nonexistent/memento/config.json", clock);
        assert_eq!(source.birthdate(), crate::clock::age::DEFAULT_BIRTHDATE);
        assert_eq!(source.current_age_string(), "\u{1F480} 24y 0d 00:00:00");
    }

    #[test]
    fn age_string_follows_the_clock() {
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 0, 0, 0)));
        let source = AgeSource::with_clock("/nonexistent/memento/config.json", clock.clone());
        clock.set(at(2024, 1, 2, 1, 2, 3));
        assert_eq!(source.current_age_string(), "\u{1F480} 24y 1d 01:02:03");
    }

    #[test]
    fn stop_is_idempotent() {
        let source = AgeSource::new("/nonexistent/memento/config.json");
        assert!(source.stop());
        assert!(!source.stop());
        assert!(!source.is_running());
    }

    #[test]
    fn local_clock_has_whole_seconds() {
        assert_eq!(LocalClock.now().nanosecond(), 0);
    }
}
