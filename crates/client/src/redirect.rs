//! Single-instance guard for the 401 redirect side effect.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Debounce gate: [`try_enter`](RedirectGuard::try_enter) succeeds at most
/// once per window, then re-arms once the window has elapsed. This is the
/// single shared gate for the redirect side effect; overlapping
/// authentication failures within the window collapse into one redirect.
#[derive(Debug)]
pub struct RedirectGuard {
    window: Duration,
    entered_at: Mutex<Option<Instant>>,
}

impl RedirectGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entered_at: Mutex::new(None),
        }
    }

    /// Attempt to claim the side effect. Returns `true` for the first
    /// caller of each debounce window.
    pub fn try_enter(&self) -> bool {
        let mut entered = self.entered_at.lock().unwrap_or_else(|e| e.into_inner());
        match *entered {
            Some(at) if at.elapsed() < self.window => false,
            _ => {
                *entered = Some(Instant::now());
                true
            }
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_wins_within_window() {
        let guard = RedirectGuard::new(Duration::from_secs(2));
        assert!(guard.try_enter());
        assert!(!guard.try_enter());
        assert!(!guard.try_enter());
    }

    #[test]
    fn re_arms_after_window_elapses() {
        let guard = RedirectGuard::new(Duration::from_millis(20));
        assert!(guard.try_enter());
        assert!(!guard.try_enter());
        std::thread::sleep(Duration::from_millis(30));
        assert!(guard.try_enter());
    }
}
