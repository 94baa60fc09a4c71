use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Runtime circuit state for a provider's upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Circuit breaker thresholds and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Default)]
struct CircuitInner {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    probing: bool,
}

impl CircuitInner {
    fn state(&self) -> CircuitState {
        match (self.opened_at, self.probing) {
            (Some(_), _) => CircuitState::Open,
            (None, true) => CircuitState::HalfOpen,
            (None, false) => CircuitState::Closed,
        }
    }
}

/// Thread-safe circuit breaker shared by clones of one adapter.
///
/// While open, the adapter reports itself unavailable without touching the
/// network, so a dead provider costs the chain nothing but a log line.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    config: CircuitBreakerConfig,
    inner: Mutex<CircuitInner>,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            name,
            config,
            inner: Mutex::new(CircuitInner::default()),
        }
    }

    pub fn with_defaults(name: &'static str) -> Self {
        Self::new(name, CircuitBreakerConfig::default())
    }

    pub fn allow_request(&self) -> bool {
        let mut inner = self.lock();
        let Some(opened_at) = inner.opened_at else {
            return true;
        };

        if opened_at.elapsed() < self.config.open_timeout {
            return false;
        }

        inner.opened_at = None;
        inner.probing = true;
        tracing::debug!(provider = self.name, "circuit half-open; probing upstream");
        true
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        *inner = CircuitInner::default();
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);

        let trip = inner.probing || inner.consecutive_failures >= self.config.failure_threshold;
        if trip && inner.opened_at.is_none() {
            inner.opened_at = Some(Instant::now());
            inner.probing = false;
            tracing::warn!(
                provider = self.name,
                failures = inner.consecutive_failures,
                "circuit opened after upstream failures"
            );
        }
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    fn lock(&self) -> MutexGuard<'_, CircuitInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold_failures() {
        let breaker = CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: 2,
                open_timeout: Duration::from_secs(60),
            },
        );

        assert_eq!(breaker.state(), CircuitState::Closed);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.allow_request());
    }

    #[test]
    fn half_open_probe_closes_on_success() {
        let breaker = CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: 1,
                open_timeout: Duration::from_millis(1),
            },
        );

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);

        std::thread::sleep(Duration::from_millis(5));
        assert!(breaker.allow_request());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.consecutive_failures(), 0);
    }

    #[test]
    fn failed_probe_reopens() {
        let breaker = CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: 5,
                open_timeout: Duration::from_millis(1),
            },
        );

        for _ in 0..5 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(5));
        assert!(breaker.allow_request());

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }
}
