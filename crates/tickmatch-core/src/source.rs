use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in configuration and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Alphavantage,
    Yahoo,
    Catalog,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::Alphavantage, Self::Yahoo, Self::Catalog];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphavantage => "alphavantage",
            Self::Yahoo => "yahoo",
            Self::Catalog => "catalog",
        }
    }

    /// Whether the provider forwards an API key with its requests.
    pub const fn requires_api_key(self) -> bool {
        matches!(self, Self::Alphavantage)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alphavantage" | "alpha_vantage" => Ok(Self::Alphavantage),
            "yahoo" => Ok(Self::Yahoo),
            "catalog" => Ok(Self::Catalog),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_identifiers_case_insensitively() {
        assert_eq!(
            "AlphaVantage".parse::<ProviderId>(),
            Ok(ProviderId::Alphavantage)
        );
        assert_eq!(" yahoo ".parse::<ProviderId>(), Ok(ProviderId::Yahoo));
        assert_eq!("catalog".parse::<ProviderId>(), Ok(ProviderId::Catalog));
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = "bloomberg".parse::<ProviderId>().expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidProvider {
                value: String::from("bloomberg")
            }
        );
    }
}
