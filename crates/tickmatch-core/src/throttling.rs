use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::provider::SourceError;
use crate::provider_policy::ProviderPolicy;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client-side request budget for one provider.
///
/// Rejections never block: they surface as a rate-limited fault and the
/// provider chain moves on to the next provider.
#[derive(Clone)]
pub struct Throttle {
    policy: ProviderPolicy,
    limiter: Arc<DirectRateLimiter>,
}

impl Throttle {
    pub fn from_policy(policy: &ProviderPolicy) -> Self {
        let quota = quota_from_window(policy.quota_window, policy.quota_limit);
        Self {
            policy: policy.clone(),
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Takes one unit of budget or reports the provider as rate limited.
    pub fn acquire(&self) -> Result<(), SourceError> {
        self.limiter.check().map_err(|_| {
            SourceError::rate_limited(format!(
                "{} client budget of {} requests per {}s exhausted",
                self.policy.provider_id,
                self.policy.quota_limit,
                self.policy.quota_window.as_secs()
            ))
        })
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let safe_limit = NonZeroU32::new(quota_limit).unwrap_or(NonZeroU32::MIN);

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(safe_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SourceErrorKind;
    use crate::ProviderId;

    #[test]
    fn rejects_once_burst_is_spent() {
        let throttle = Throttle::from_policy(&ProviderPolicy::per_minute(ProviderId::Yahoo, 2));

        assert!(throttle.acquire().is_ok());
        assert!(throttle.acquire().is_ok());

        let error = throttle.acquire().expect_err("third request should be rejected");
        assert_eq!(error.kind(), SourceErrorKind::RateLimited);
        assert_eq!(error.message(), "yahoo client budget of 2 requests per 60s exhausted");
    }

    #[test]
    fn clones_share_one_budget() {
        let throttle = Throttle::from_policy(&ProviderPolicy::per_minute(ProviderId::Alphavantage, 1));
        let clone = throttle.clone();

        assert!(throttle.acquire().is_ok());
        assert!(clone.acquire().is_err());
    }
}
