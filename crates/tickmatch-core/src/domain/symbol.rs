use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 15;

/// Normalized exchange ticker symbol.
///
/// Tickers are uppercase ASCII alphanumerics plus `.` and `-` (share classes such
/// as `BRK.B` or `BT-A`). Leading digits are allowed for venues like HKEX.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = Ticker::parse(" aapl ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_share_classes_and_numeric_codes() {
        assert_eq!(Ticker::parse("brk.b").expect("valid").as_str(), "BRK.B");
        assert_eq!(Ticker::parse("0700").expect("valid").as_str(), "0700");
    }

    #[test]
    fn rejects_colon_and_whitespace() {
        let err = Ticker::parse("AAPL:X").expect_err("must fail");
        assert_eq!(err, ValidationError::TickerInvalidChar { ch: ':', index: 4 });

        let err = Ticker::parse("MS FT").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerInvalidChar { ch: ' ', .. }));
    }

    #[test]
    fn rejects_overlong_ticker() {
        let err = Ticker::parse("ABCDEFGHIJKLMNOP").expect_err("must fail");
        assert_eq!(err, ValidationError::TickerTooLong { len: 16, max: 15 });
    }
}
