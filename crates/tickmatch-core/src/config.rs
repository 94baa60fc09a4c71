use std::env;
use std::sync::Arc;

use crate::adapters::{AlphaVantageAdapter, CatalogAdapter, YahooAdapter};
use crate::chain::ProviderChain;
use crate::http_client::{HttpClient, NoopHttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::CompanySource;
use crate::similarity::MAX_SCORE;
use crate::unstructured::DEFAULT_THRESHOLD;
use crate::{ConfigError, Disambiguator, ProviderId};

/// Key used when no Alpha Vantage credential is configured.
pub const DEMO_API_KEY: &str = "demo";

/// Fallback chain used when none is configured.
pub const DEFAULT_FALLBACKS: [ProviderId; 1] = [ProviderId::Alphavantage];

#[derive(Clone)]
enum ProviderSpec {
    Named(String),
    Source(Arc<dyn CompanySource>),
}

/// Builder for a [`Disambiguator`].
///
/// Providers are named by identifier (`alphavantage`, `yahoo`, `catalog`) or
/// supplied as ready-made [`CompanySource`] instances. Identifiers are
/// validated by [`build`](Self::build), which is the only place configuration
/// can fail.
///
/// # Environment Variables
///
/// | Setting | Primary Env Var | Fallback Env Var |
/// |---------|-----------------|------------------|
/// | Alpha Vantage key | `TICKMATCH_ALPHAVANTAGE_API_KEY` | `ALPHAVANTAGE_API_KEY` |
///
/// # Example
///
/// ```rust,ignore
/// use tickmatch_core::DisambiguatorBuilder;
///
/// let disambiguator = DisambiguatorBuilder::new()
///     .with_env_credentials()
///     .with_primary_provider("yahoo")
///     .with_fallback_providers(["alphavantage"])
///     .with_threshold(85)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct DisambiguatorBuilder {
    api_key: Option<String>,
    primary: ProviderSpec,
    fallbacks: Option<Vec<ProviderSpec>>,
    threshold: u8,
    timeout_ms: u64,
    use_mock: bool,
}

impl Default for DisambiguatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DisambiguatorBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            primary: ProviderSpec::Named(ProviderId::Alphavantage.as_str().to_owned()),
            fallbacks: None,
            threshold: DEFAULT_THRESHOLD,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_mock: false,
        }
    }

    /// Reads the Alpha Vantage key from the environment, if set.
    pub fn with_env_credentials(mut self) -> Self {
        if let Ok(key) = env::var("TICKMATCH_ALPHAVANTAGE_API_KEY")
            .or_else(|_| env::var("ALPHAVANTAGE_API_KEY"))
        {
            self.api_key = Some(key);
        }
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_primary_provider(mut self, provider: impl Into<String>) -> Self {
        self.primary = ProviderSpec::Named(provider.into());
        self
    }

    /// Replaces the fallback list. An empty list means primary only.
    pub fn with_fallback_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = Some(
            providers
                .into_iter()
                .map(|provider| ProviderSpec::Named(provider.into()))
                .collect(),
        );
        self
    }

    pub fn with_primary_source(mut self, source: Arc<dyn CompanySource>) -> Self {
        self.primary = ProviderSpec::Source(source);
        self
    }

    /// Appends a caller-supplied fallback. Without explicit fallback providers
    /// this replaces the default fallback list.
    pub fn with_fallback_source(mut self, source: Arc<dyn CompanySource>) -> Self {
        self.fallbacks
            .get_or_insert_with(Vec::new)
            .push(ProviderSpec::Source(source));
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Serve every named provider from offline catalogs instead of HTTP.
    pub fn with_mock_mode(mut self) -> Self {
        self.use_mock = true;
        self
    }

    /// Identifiers of the configured chain, primary first. Caller-supplied
    /// sources report their own id.
    pub fn provider_ids(&self) -> Result<Vec<ProviderId>, ConfigError> {
        self.specs()
            .iter()
            .map(|spec| match spec {
                ProviderSpec::Named(name) => parse_provider(name),
                ProviderSpec::Source(source) => Ok(source.id()),
            })
            .collect()
    }

    pub fn build(self) -> Result<Disambiguator, ConfigError> {
        if self.threshold > MAX_SCORE {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.threshold,
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let http_client: Arc<dyn HttpClient> = if self.use_mock {
            Arc::new(NoopHttpClient)
        } else {
            Arc::new(ReqwestHttpClient::new())
        };

        let primary = self.instantiate(&self.primary, &http_client)?;
        let fallbacks = self
            .specs()
            .iter()
            .skip(1)
            .map(|spec| self.instantiate(spec, &http_client))
            .collect::<Result<Vec<_>, _>>()?;
        let chain = ProviderChain::new(primary, fallbacks);

        tracing::debug!(
            providers = ?chain.providers().map(ProviderId::as_str).collect::<Vec<_>>(),
            threshold = self.threshold,
            mock = self.use_mock,
            "built provider chain"
        );

        Ok(Disambiguator::new(chain).with_threshold(self.threshold))
    }

    fn specs(&self) -> Vec<ProviderSpec> {
        let fallbacks = match &self.fallbacks {
            Some(fallbacks) => fallbacks.clone(),
            None => DEFAULT_FALLBACKS
                .iter()
                .map(|id| ProviderSpec::Named(id.as_str().to_owned()))
                .collect(),
        };

        let mut specs = Vec::with_capacity(1 + fallbacks.len());
        specs.push(self.primary.clone());
        specs.extend(fallbacks);
        specs
    }

    fn instantiate(
        &self,
        spec: &ProviderSpec,
        http_client: &Arc<dyn HttpClient>,
    ) -> Result<Arc<dyn CompanySource>, ConfigError> {
        let name = match spec {
            ProviderSpec::Source(source) => return Ok(Arc::clone(source)),
            ProviderSpec::Named(name) => name,
        };

        Ok(match parse_provider(name)? {
            ProviderId::Alphavantage => {
                let key = self.api_key.clone().unwrap_or_else(|| DEMO_API_KEY.to_owned());
                Arc::new(
                    AlphaVantageAdapter::with_http_client(Arc::clone(http_client), key)
                        .with_timeout_ms(self.timeout_ms),
                )
            }
            ProviderId::Yahoo => Arc::new(
                YahooAdapter::with_http_client(Arc::clone(http_client))
                    .with_timeout_ms(self.timeout_ms),
            ),
            ProviderId::Catalog => Arc::new(CatalogAdapter::default()),
        })
    }
}

fn parse_provider(name: &str) -> Result<ProviderId, ConfigError> {
    name.parse::<ProviderId>()
        .map_err(|_| ConfigError::UnsupportedProvider {
            value: name.to_owned(),
        })
}
