use crate::core::errors::ExchangeError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use tracing::trace;

/// Weight-based request throttle shared by every call of one connector.
pub struct Throttle {
    limiter: DefaultDirectRateLimiter,
    capacity: NonZeroU32,
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Throttle {
    /// `per_second` tokens refill each second; a zero rate is clamped to one.
    pub fn per_second(per_second: u32) -> Self {
        let capacity = NonZeroU32::new(per_second).unwrap_or(nonzero!(1u32));
        Self {
            limiter: RateLimiter::direct(Quota::per_second(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity.get()
    }

    /// Wait until `cost` tokens are available.
    pub async fn acquire(&self, cost: u32) -> Result<(), ExchangeError> {
        let Some(cost) = NonZeroU32::new(cost) else {
            return Ok(());
        };
        trace!(cost = cost.get(), "acquiring request weight");
        self.limiter.until_n_ready(cost).await.map_err(|_| {
            ExchangeError::RateLimitExceeded(format!(
                "request weight {} exceeds throttle capacity {}",
                cost, self.capacity
            ))
        })
    }
}
