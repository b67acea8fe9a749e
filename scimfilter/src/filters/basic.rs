//! Basic filter form values and the query they produce.

use serde::{Deserialize, Serialize};

use crate::errors::{FilterResult, ValidationError, ValidationIssue};
use crate::search::{FilterExpression, OperatorCode};

pub const FILTER_ATTRIBUTE_FIELD: &str = "filterAttribute";
pub const FILTER_VALUES_FIELD: &str = "filterValues";

/// A selectable condition in the form's dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionOption {
    pub value: OperatorCode,
    pub text: &'static str,
}

/// Default condition dropdown: starts with, ends with, contains, equals.
pub fn condition_options() -> Vec<ConditionOption> {
    OperatorCode::ALL
        .into_iter()
        .map(|code| ConditionOption {
            value: code,
            text: code.label(),
        })
        .collect()
}

/// Values submitted from the basic filter form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFilter {
    pub attribute: String,
    pub condition: OperatorCode,
    pub value: String,
}

impl BasicFilter {
    pub fn new(attribute: impl Into<String>, condition: OperatorCode, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            condition,
            value: value.into(),
        }
    }

    /// Join the fields into `attribute condition value`.
    pub fn to_query(&self) -> String {
        format!("{} {} {}", self.attribute, self.condition, self.value)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.attribute.trim().is_empty() {
            issues.push(ValidationIssue::new(
                FILTER_ATTRIBUTE_FIELD,
                "required",
                "an attribute must be selected",
            ));
        } else if self.attribute.trim().contains(char::is_whitespace) {
            issues.push(ValidationIssue::new(
                FILTER_ATTRIBUTE_FIELD,
                "single_word",
                "attribute names cannot contain whitespace",
            ));
        }
        if self.value.trim().is_empty() {
            issues.push(ValidationIssue::new(FILTER_VALUES_FIELD, "required", "a value must be entered"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }

    /// Validate, then produce the structured expression.
    pub fn to_expression(&self) -> FilterResult<FilterExpression> {
        self.validate()?;
        Ok(FilterExpression::new(
            self.attribute.trim(),
            self.condition,
            self.value.trim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FilterError;

    #[test]
    fn condition_options_follow_dropdown_order() {
        let options = condition_options();
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["sw", "ew", "co", "eq"]);
        assert_eq!(options[0].text, "Starts with");
        assert_eq!(options[3].text, "Equals");
    }

    #[test]
    fn to_query_joins_fields_with_spaces() {
        let filter = BasicFilter::new("emails", OperatorCode::Co, "wso2.com");
        assert_eq!(filter.to_query(), "emails co wso2.com");
    }

    #[test]
    fn validate_collects_every_issue() {
        let filter = BasicFilter::new(" ", OperatorCode::Eq, "");
        let err = filter.validate().expect_err("blank fields should fail");
        let fields: Vec<&str> = err.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, [FILTER_ATTRIBUTE_FIELD, FILTER_VALUES_FIELD]);
    }

    #[test]
    fn validate_rejects_multi_word_attribute() {
        let err = BasicFilter::new("user name", OperatorCode::Eq, "x")
            .validate()
            .expect_err("attribute with space");
        assert_eq!(err.issues[0].code, "single_word");
    }

    #[test]
    fn to_expression_wraps_validation_error() {
        let err = BasicFilter::new("name", OperatorCode::Sw, "  ")
            .to_expression()
            .expect_err("missing value");
        assert!(matches!(err, FilterError::Validation(v) if v.issues.len() == 1));

        let expr = BasicFilter::new(" name ", OperatorCode::Sw, " john doe ")
            .to_expression()
            .unwrap();
        assert_eq!(expr.to_string(), "name sw john doe");
    }
}
