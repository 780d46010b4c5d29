//! The fixed table of screening fields and the vector type built from them.

use serde::{Deserialize, Serialize};

/// The number of patient metrics fed to the classifier.
pub const FIELD_COUNT: usize = 8;

/// A named patient metric with an inclusive valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Display name, also used as the CSV column header.
    pub name: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

/// The eight screening fields in the order the classifier expects them.
///
/// This order defines the positional layout of every [`FeatureVector`] and
/// the column order of the prediction log.
pub const FIELD_SPECS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        name: "Pregnancies",
        min: 0.0,
        max: 20.0,
    },
    FieldSpec {
        name: "Glucose",
        min: 0.0,
        max: 300.0,
    },
    FieldSpec {
        name: "Blood Pressure",
        min: 0.0,
        max: 200.0,
    },
    FieldSpec {
        name: "Skin Thickness",
        min: 0.0,
        max: 100.0,
    },
    FieldSpec {
        name: "Insulin",
        min: 0.0,
        max: 850.0,
    },
    FieldSpec {
        name: "BMI",
        min: 0.0,
        max: 70.0,
    },
    FieldSpec {
        name: "Diabetes Pedigree",
        min: 0.0,
        max: 2.5,
    },
    FieldSpec {
        name: "Age",
        min: 0.0,
        max: 120.0,
    },
];

/// Ordered numeric values fed to the classifier.
///
/// Values are stored in [`FIELD_SPECS`] declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FIELD_COUNT],
}

impl FeatureVector {
    /// Creates a vector from values in field declaration order.
    #[must_use]
    pub const fn new(values: [f64; FIELD_COUNT]) -> Self {
        Self { values }
    }

    /// Returns the values in field declaration order.
    #[must_use]
    pub const fn values(&self) -> &[f64; FIELD_COUNT] {
        &self.values
    }

    /// Returns the values as `f32` for tensor construction.
    #[must_use]
    pub fn to_f32(&self) -> [f32; FIELD_COUNT] {
        self.values.map(|v| v as f32)
    }

    /// Iterates over `(field name, value)` pairs in declaration order.
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FIELD_SPECS
            .iter()
            .zip(self.values.iter())
            .map(|(spec, &value)| (spec.name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_shape() {
        assert_eq!(FIELD_SPECS.len(), FIELD_COUNT);
        assert_eq!(FIELD_SPECS[0].name, "Pregnancies");
        assert_eq!(FIELD_SPECS[FIELD_COUNT - 1].name, "Age");

        for spec in &FIELD_SPECS {
            assert!(spec.min < spec.max, "{} has an empty range", spec.name);
        }
    }

    #[test]
    fn test_vector_preserves_order() {
        let vector = FeatureVector::new([2.0, 120.0, 70.0, 20.0, 80.0, 25.0, 0.5, 30.0]);

        assert_eq!(vector.values()[1], 120.0);

        let named: Vec<_> = vector.iter_named().collect();
        assert_eq!(named[2], ("Blood Pressure", 70.0));
        assert_eq!(named[6], ("Diabetes Pedigree", 0.5));
    }

    #[test]
    fn test_to_f32_matches_values() {
        let vector = FeatureVector::new([0.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let floats = vector.to_f32();

        assert_eq!(floats.len(), FIELD_COUNT);
        assert!((floats[1] - 1.5).abs() < f32::EPSILON);
    }
}
