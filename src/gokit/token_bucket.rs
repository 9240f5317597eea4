use crate::utils::error::{KitError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Rate limiter that gains one token every `fill_interval`, holding at most `cap`.
///
/// A 10ms interval with a cap of 100 fills the bucket in one second, i.e. 100 qps.
/// The bucket starts empty. It must be created inside a tokio runtime.
#[derive(Debug)]
pub struct TokenBucket {
    tokens: Arc<Semaphore>,
    cap: usize,
    refill: JoinHandle<()>,
}

impl TokenBucket {
    pub fn new(fill_interval: Duration, cap: usize) -> Result<Self> {
        if fill_interval.is_zero() {
            return Err(KitError::invalid_argument("fill interval must be positive"));
        }
        if cap == 0 {
            return Err(KitError::invalid_argument("token bucket capacity must be positive"));
        }

        let tokens = Arc::new(Semaphore::new(0));
        let refill = tokio::spawn(fill(tokens.clone(), fill_interval, cap));
        Ok(Self { tokens, cap, refill })
    }

    /// Take a token if one is available right now.
    pub fn take_token(&self) -> bool {
        match self.tokens.try_acquire() {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// Wait until a token is available and take it.
    pub async fn take_token_wait(&self) -> bool {
        match self.tokens.acquire().await {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    pub fn available(&self) -> usize {
        self.tokens.available_permits()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

impl Drop for TokenBucket {
    fn drop(&mut self) {
        self.refill.abort();
    }
}

async fn fill(tokens: Arc<Semaphore>, fill_interval: Duration, cap: usize) {
    let mut ticker = tokio::time::interval(fill_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if tokens.available_permits() < cap {
            tokens.add_permits(1);
        }
    }
}
