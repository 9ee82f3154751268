// src/services/rate_limit.rs
// DOCUMENTATION: Process-wide throttle for classification requests
// PURPOSE: Inference is CPU bound; excess requests are refused with 429

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;

use crate::errors::AppError;

pub struct ClassifyLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl ClassifyLimiter {
    pub fn per_second(rate: u32) -> Self {
        let rate = NonZeroU32::new(rate).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    pub fn check(&self) -> Result<(), AppError> {
        self.limiter.check().map_err(|_| {
            log::warn!("Classification rate limit exceeded");
            AppError::RateLimitExceeded
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_is_bounded() {
        let limiter = ClassifyLimiter::per_second(2);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(matches!(limiter.check(), Err(AppError::RateLimitExceeded)));
    }

    #[test]
    fn test_zero_rate_still_allows_one() {
        let limiter = ClassifyLimiter::per_second(0);
        assert!(limiter.check().is_ok());
    }
}
