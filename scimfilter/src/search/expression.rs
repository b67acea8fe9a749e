use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::aliases::OperatorCode;
use super::normalizer::QueryNormalizer;
use crate::errors::{FilterError, FilterResult};

/// A canonical `attribute operator value` filter.
///
/// ```
/// use scimfilter::search::{FilterExpression, OperatorCode};
///
/// let expr: FilterExpression = "name sw john doe".parse().unwrap();
/// assert_eq!(expr.attribute, "name");
/// assert_eq!(expr.operator, OperatorCode::Sw);
/// assert_eq!(expr.value, "john doe");
/// assert_eq!(expr.to_string(), "name sw john doe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterExpression {
    pub attribute: String,
    pub operator: OperatorCode,
    pub value: String,
}

impl FilterExpression {
    pub fn new(attribute: impl Into<String>, operator: OperatorCode, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    /// Normalize a human-typed query, then parse the result strictly.
    pub fn from_raw(normalizer: &QueryNormalizer, raw: &str) -> FilterResult<Self> {
        normalizer.normalize(raw).parse()
    }
}

impl FromStr for FilterExpression {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(FilterError::invalid("filter expression is empty"));
        }

        let mut parts = input.splitn(3, ' ');
        let attribute = parts.next().unwrap_or_default();
        let operator = parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| FilterError::invalid(format!("filter '{input}' is missing an operator")))?;
        let operator: OperatorCode = operator.parse()?;
        let value = parts
            .next()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .ok_or_else(|| FilterError::invalid(format!("filter '{input}' is missing a value")))?;

        Ok(Self::new(attribute, operator, value))
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator, self.value)
    }
}
