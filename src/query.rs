//! Width query parsing and evaluation
//!
//! A width query is the parsed form of a condition such as `(max-width: 900px)`:
//! a comparison sign plus a pixel threshold. Parsing is a pure transform of text
//! to structured data; evaluation compares a viewport width against the
//! threshold with CSS semantics.

use std::fmt;

use crate::error::{Result, ViewportError};

/// Comparison sign of a width query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Matches when the viewport is at least as wide as the threshold
    Min,
    /// Matches when the viewport is at most as wide as the threshold
    Max,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Min => write!(f, "min"),
            Sign::Max => write!(f, "max"),
        }
    }
}

/// Parsed width condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthQuery {
    /// Comparison sign
    pub sign: Sign,
    /// Pixel threshold
    pub width: f64,
}

impl WidthQuery {
    /// Parse a width condition of the form `(min-width: Npx)` or `(max-width: Npx)`.
    ///
    /// Matching is case-insensitive and tolerates whitespace around the text
    /// and around the colon. `N` must be a non-negative integer.
    pub fn parse(media: &str) -> Result<Self> {
        let invalid = || ViewportError::InvalidQuery(media.to_string());

        let inner = media
            .trim()
            .strip_prefix('(')
            .and_then(|text| text.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let (feature, value) = inner.split_once(':').ok_or_else(invalid)?;

        let sign = match feature.trim().to_ascii_lowercase().as_str() {
            "min-width" => Sign::Min,
            "max-width" => Sign::Max,
            _ => return Err(invalid()),
        };

        let value = value.trim().to_ascii_lowercase();
        let digits = value.strip_suffix("px").ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let width = digits.parse::<f64>().map_err(|_| invalid())?;

        Ok(Self { sign, width })
    }

    /// Evaluate this query against a viewport width in pixels
    pub fn eval(&self, width: f64) -> bool {
        match self.sign {
            Sign::Min => width >= self.width,
            Sign::Max => width <= self.width,
        }
    }
}

impl fmt::Display for WidthQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-width: {}px)", self.sign, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_min() {
        let query = WidthQuery::parse("(min-width: 1200px)").unwrap();
        assert_eq!(query.sign, Sign::Min);
        assert_eq!(query.width, 1200.0);
    }

    #[test]
    fn test_parse_max() {
        let query = WidthQuery::parse("(max-width: 500px)").unwrap();
        assert_eq!(query.sign, Sign::Max);
        assert_eq!(query.width, 500.0);
    }

    #[test]
    fn test_parse_case_and_whitespace() {
        let query = WidthQuery::parse("  ( MAX-WIDTH :900PX )  ").unwrap();
        assert_eq!(query.sign, Sign::Max);
        assert_eq!(query.width, 900.0);

        let query = WidthQuery::parse("(min-width:0px)").unwrap();
        assert_eq!(query.sign, Sign::Min);
        assert_eq!(query.width, 0.0);
    }

    #[test]
    fn test_parse_round_trip() {
        for text in ["(min-width: 1200px)", "(max-width: 500px)", "(max-width: 0px)"] {
            let query = WidthQuery::parse(text).unwrap();
            assert_eq!(query.to_string(), text);

            let reparsed = WidthQuery::parse(&query.to_string()).unwrap();
            assert_eq!(reparsed, query);
        }
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let bad = [
            "",
            "min-width: 500px",
            "(width: 500px)",
            "(min-height: 500px)",
            "(min-width: 500)",
            "(min-width: px)",
            "(min-width: -500px)",
            "(min-width: 5 00px)",
            "(min-width: 500px) and (max-width: 900px)",
        ];
        for text in bad {
            assert!(
                matches!(WidthQuery::parse(text), Err(ViewportError::InvalidQuery(_))),
                "accepted: {:?}",
                text
            );
        }
    }

    #[test]
    fn test_eval_boundaries() {
        let min = WidthQuery::parse("(min-width: 900px)").unwrap();
        assert!(!min.eval(899.0));
        assert!(min.eval(900.0));
        assert!(min.eval(901.0));

        let max = WidthQuery::parse("(max-width: 900px)").unwrap();
        assert!(max.eval(899.0));
        assert!(max.eval(900.0));
        assert!(!max.eval(901.0));
    }
}
