//! Form validation for the diabetes screening tool.
//!
//! This crate turns the free-text entries collected by the shell into a
//! validated [`FeatureVector`] ready for the classifier. Every declared
//! field must parse as a number and fall inside its inclusive range.

use std::collections::HashMap;

use screening_structs::{FIELD_COUNT, FIELD_SPECS, FeatureVector};
use thiserror::Error;

/// Reasons a set of form entries is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    /// The entry for `field` is not a number (missing entries count too).
    #[error("{field} must be a number")]
    Parse { field: &'static str },

    /// The entry for `field` parsed but lies outside the inclusive range.
    #[error("{field} must be between {min} and {max} (got {value})")]
    Range {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Validates raw form entries against the field table.
///
/// Fields are checked in [`FIELD_SPECS`] declaration order; the first
/// failing field aborts validation and the error names that field. A
/// missing entry is treated like an empty string and fails to parse.
/// Returns the full vector only when every field passes; there is no
/// partial result.
///
/// # Errors
///
/// Returns [`ValidateError::Parse`] for non-numeric input and
/// [`ValidateError::Range`] for out-of-bounds values (NaN is rejected
/// here as well).
pub fn validate(entries: &HashMap<String, String>) -> Result<FeatureVector, ValidateError> {
    let mut values = [0.0; FIELD_COUNT];

    for (slot, spec) in values.iter_mut().zip(FIELD_SPECS.iter()) {
        let raw = entries.get(spec.name).map_or("", String::as_str);

        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidateError::Parse { field: spec.name })?;

        // Written so that NaN fails the range check rather than slipping through.
        if !(value >= spec.min && value <= spec.max) {
            return Err(ValidateError::Range {
                field: spec.name,
                min: spec.min,
                max: spec.max,
                value,
            });
        }

        *slot = value;
    }

    Ok(FeatureVector::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_entries() -> HashMap<String, String> {
        let values = ["2", "120", "70", "20", "80", "25.0", "0.5", "30"];
        FIELD_SPECS
            .iter()
            .zip(values)
            .map(|(spec, value)| (spec.name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_entries_preserve_order() {
        let vector = validate(&complete_entries()).expect("entries are valid");
        assert_eq!(
            vector.values(),
            &[2.0, 120.0, 70.0, 20.0, 80.0, 25.0, 0.5, 30.0]
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for spec in &FIELD_SPECS {
            let mut entries = complete_entries();
            entries.insert(spec.name.to_string(), spec.min.to_string());
            assert!(validate(&entries).is_ok(), "{} rejected its min", spec.name);

            entries.insert(spec.name.to_string(), spec.max.to_string());
            assert!(validate(&entries).is_ok(), "{} rejected its max", spec.name);
        }
    }

    #[test]
    fn test_out_of_range_names_the_field() {
        let mut entries = complete_entries();
        entries.insert("Glucose".to_string(), "300.001".to_string());

        let error = validate(&entries).expect_err("value is out of range");
        assert_eq!(
            error,
            ValidateError::Range {
                field: "Glucose",
                min: 0.0,
                max: 300.0,
                value: 300.001,
            }
        );

        let mut entries = complete_entries();
        entries.insert("Age".to_string(), "-0.001".to_string());
        let error = validate(&entries).expect_err("value is out of range");
        assert!(matches!(error, ValidateError::Range { field: "Age", .. }));
    }

    #[test]
    fn test_non_numeric_entry() {
        let mut entries = complete_entries();
        entries.insert("BMI".to_string(), "twenty-five".to_string());

        assert_eq!(
            validate(&entries),
            Err(ValidateError::Parse { field: "BMI" })
        );
    }

    #[test]
    fn test_missing_entry_fails_to_parse() {
        let mut entries = complete_entries();
        entries.remove("Insulin");

        assert_eq!(
            validate(&entries),
            Err(ValidateError::Parse { field: "Insulin" })
        );
    }

    #[test]
    fn test_first_failure_wins_in_declaration_order() {
        // Both Glucose and Age are bad; Glucose is declared first.
        let mut entries = complete_entries();
        entries.insert("Age".to_string(), "abc".to_string());
        entries.insert("Glucose".to_string(), "999".to_string());

        let error = validate(&entries).expect_err("two fields are invalid");
        assert!(matches!(error, ValidateError::Range { field: "Glucose", .. }));
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut entries = complete_entries();
        entries.insert("Insulin".to_string(), "NaN".to_string());

        let error = validate(&entries).expect_err("NaN is not a usable value");
        assert!(matches!(error, ValidateError::Range { field: "Insulin", .. }));
    }
}
