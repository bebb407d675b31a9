//! Rolling one-minute consumption budget for the classifier
//!
//! The true cost of a classification call is only known after the response
//! arrives, so the budget is two-phase: [`RateBudget::check_available`] is a
//! non-blocking advisory check before the call, and
//! [`RateBudget::record_consumption`] records the actual cost afterwards,
//! unconditionally. The window is keyed to the last recorded request rather
//! than a fixed clock boundary, so a burst after idle time gets a fresh
//! budget. This component cannot fail, only delay.

use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Tracks classifier token consumption within a rolling one-minute window
#[derive(Debug)]
pub struct RateBudget {
    limit: u32,
    window: Duration,
    window_tokens: u32,
    last_request: Option<Instant>,
}

impl RateBudget {
    /// Creates a budget with the standard one-minute window
    pub fn new(tokens_per_minute: u32) -> Self {
        Self::with_window(tokens_per_minute, Duration::from_secs(60))
    }

    /// Creates a budget with an explicit window length (tests use short ones)
    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            window_tokens: 0,
            last_request: None,
        }
    }

    /// Non-blocking advisory check: is there budget left in this window?
    pub fn check_available(&mut self) -> bool {
        self.roll_window(Instant::now());
        self.window_tokens < self.limit
    }

    /// Records the actual cost of a call, stamping the window
    ///
    /// Always called after a classification attempt, whether or not the
    /// advisory check passed beforehand; the window may briefly overshoot
    /// the limit, which the next check absorbs by waiting.
    pub fn record_consumption(&mut self, cost: u32) {
        let now = Instant::now();
        self.roll_window(now);
        self.window_tokens = self.window_tokens.saturating_add(cost);
        self.last_request = Some(now);
    }

    /// Suspends the caller until the window rolls over or `cancel` fires
    pub async fn wait_until_available(&mut self, cancel: &mut watch::Receiver<bool>) {
        while let Some(wait) = self.time_until_available(Instant::now()) {
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                changed = cancel.changed() => {
                    // A dropped sender also ends the wait
                    if changed.is_err() || *cancel.borrow() {
                        return;
                    }
                }
            }
        }
    }

    /// Tokens recorded in the current window
    pub fn window_tokens(&self) -> u32 {
        self.window_tokens
    }

    /// Resets the window if the last recorded request is older than it
    fn roll_window(&mut self, now: Instant) {
        if let Some(last) = self.last_request {
            if now.duration_since(last) >= self.window {
                self.window_tokens = 0;
            }
        }
    }

    /// Time until the window rolls over; `None` when budget is available now
    fn time_until_available(&mut self, now: Instant) -> Option<Duration> {
        self.roll_window(now);
        if self.window_tokens < self.limit {
            return None;
        }

        self.last_request
            .map(|last| self.window.saturating_sub(now.duration_since(last)))
    }
}
