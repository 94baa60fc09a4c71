use std::time::Duration;

use crate::ProviderId;

/// Client-side request quota for one HTTP provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPolicy {
    pub provider_id: ProviderId,
    pub quota_limit: u32,
    pub quota_window: Duration,
}

impl ProviderPolicy {
    pub const fn per_minute(provider_id: ProviderId, quota_limit: u32) -> Self {
        Self {
            provider_id,
            quota_limit,
            quota_window: Duration::from_secs(60),
        }
    }

    /// Free-tier key: five calls a minute.
    pub const fn alphavantage_default() -> Self {
        Self::per_minute(ProviderId::Alphavantage, 5)
    }

    pub const fn yahoo_default() -> Self {
        Self::per_minute(ProviderId::Yahoo, 60)
    }
}
