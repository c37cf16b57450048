// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge throttle with a single trailing call.
//!
//! The first offer in a quiet period runs immediately. Offers inside the
//! interval that follows are folded into one trailing run, scheduled for the
//! end of the interval; the caller keeps the latest payload and applies it
//! when [`Throttle::poll`] says the trailing run is due. Nothing here owns a
//! timer: the host drives it by polling from its frame tick.

use crate::time::{Duration, HostTime};

/// What [`Throttle::offer`] decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Run now.
    Now,
    /// A trailing run was scheduled for `until`.
    Deferred {
        /// When the trailing run becomes due.
        until: HostTime,
    },
    /// A trailing run was already pending; the offer joins it.
    Coalesced {
        /// When the pending trailing run becomes due.
        until: HostTime,
    },
}

impl Admission {
    /// Should the caller apply its payload right away?
    #[must_use]
    pub const fn runs_now(self) -> bool {
        matches!(self, Self::Now)
    }
}

/// At most one run per interval, plus one trailing run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<HostTime>,
    trailing_at: Option<HostTime>,
}

impl Throttle {
    /// Creates a throttle that has never run.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            trailing_at: None,
        }
    }

    /// The minimum spacing between runs.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// When the pending trailing run is due, if one is pending.
    #[must_use]
    pub const fn pending(&self) -> Option<HostTime> {
        self.trailing_at
    }

    /// Offers a call at `now`.
    pub fn offer(&mut self, now: HostTime) -> Admission {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                let until = last + self.interval;
                if let Some(until) = self.trailing_at {
                    Admission::Coalesced { until }
                } else {
                    self.trailing_at = Some(until);
                    Admission::Deferred { until }
                }
            }
            _ => {
                // A leading run supersedes a trailing run that was due but
                // not yet polled.
                self.last_run = Some(now);
                self.trailing_at = None;
                Admission::Now
            }
        }
    }

    /// Returns `true` exactly once when the trailing run is due at `now`.
    ///
    /// The trailing run counts as a run: the next interval starts at `now`.
    pub fn poll(&mut self, now: HostTime) -> bool {
        match self.trailing_at {
            Some(until) if now >= until => {
                self.trailing_at = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn throttle() -> Throttle {
        Throttle::new(Duration::from_millis(400))
    }

    #[test]
    fn first_offer_runs_immediately() {
        let mut t = throttle();
        assert_eq!(t.offer(ms(1000)), Admission::Now);
        assert_eq!(t.pending(), None);
        assert!(!t.poll(ms(5000)));
    }

    #[test]
    fn burst_coalesces_into_one_trailing_run() {
        let mut t = throttle();
        assert!(t.offer(ms(0)).runs_now());
        assert_eq!(t.offer(ms(100)), Admission::Deferred { until: ms(400) });
        assert_eq!(t.offer(ms(200)), Admission::Coalesced { until: ms(400) });
        assert_eq!(t.offer(ms(399)), Admission::Coalesced { until: ms(400) });

        assert!(!t.poll(ms(399)));
        assert!(t.poll(ms(400)));
        assert!(!t.poll(ms(401)), "trailing run fires once");
    }

    #[test]
    fn trailing_run_restarts_the_interval() {
        let mut t = throttle();
        t.offer(ms(0));
        t.offer(ms(50));
        assert!(t.poll(ms(416)));
        assert_eq!(t.offer(ms(600)), Admission::Deferred { until: ms(816) });
    }

    #[test]
    fn quiet_period_allows_a_new_leading_run() {
        let mut t = throttle();
        t.offer(ms(0));
        assert_eq!(t.offer(ms(400)), Admission::Now);
        assert_eq!(t.offer(ms(1000)), Admission::Now);
    }

    #[test]
    fn leading_run_supersedes_unpolled_trailing_run() {
        let mut t = throttle();
        t.offer(ms(0));
        t.offer(ms(100));
        // Nobody polled at 400; the next offer runs directly.
        assert_eq!(t.offer(ms(900)), Admission::Now);
        assert_eq!(t.pending(), None);
        assert!(!t.poll(ms(900)));
    }
}
