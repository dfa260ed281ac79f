//! Fixed-window request rate limiting.
//!
//! A coarse counter-plus-window-start limiter, deliberately not a sliding
//! window or token bucket: a burst straddling the window boundary can
//! momentarily reach up to 2x the nominal rate, which vendors tolerate
//! because they enforce their own hard caps with slack.

use tokio::time::{Duration, Instant, sleep};
use tracing::info;

/// Request budget per rolling minute against one provider.
pub const MAX_REQUESTS_PER_MINUTE: u32 = 75;
/// Length of the fixed window.
pub const COOLDOWN_SECONDS: u64 = 60;

pub struct FixedWindowLimiter {
    max_per_window: u32,
    cooldown: Duration,
    count: u32,
    window_start: Instant,
}

impl FixedWindowLimiter {
    pub fn new(max_per_window: u32) -> Self {
        Self::with_cooldown(max_per_window, Duration::from_secs(COOLDOWN_SECONDS))
    }

    pub fn with_cooldown(max_per_window: u32, cooldown: Duration) -> Self {
        Self {
            max_per_window,
            cooldown,
            count: 0,
            window_start: Instant::now(),
        }
    }

    /// Suspends the caller until a request may be issued without exceeding
    /// the per-window budget, then records the request.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.cooldown {
            // Window elapsed naturally; reset wholesale.
            self.count = 0;
            self.window_start = Instant::now();
        } else if self.count >= self.max_per_window {
            let wait = self.cooldown.saturating_sub(elapsed);
            if !wait.is_zero() {
                info!(wait_secs = wait.as_secs_f64(), "rate limit reached; cooling down");
                sleep(wait).await;
            }
            self.count = 0;
            self.window_start = Instant::now();
        }
        self.count += 1;
    }
}
