use serde::{Deserialize, Serialize};

/// Error bounds attached to a quantity. Every field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantityErrors {
    /// Symmetric uncertainty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    /// Lower bound uncertainty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_uncertainty: Option<f64>,
    /// Upper bound uncertainty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_uncertainty: Option<f64>,
    /// Confidence level in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

impl QuantityErrors {
    /// True when no error kind is populated.
    pub fn is_empty(&self) -> bool {
        self.uncertainty.is_none()
            && self.lower_uncertainty.is_none()
            && self.upper_uncertainty.is_none()
            && self.confidence_level.is_none()
    }

    /// Multiplies every uncertainty bound (not the confidence level) by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            uncertainty: self.uncertainty.map(|v| v * factor),
            lower_uncertainty: self.lower_uncertainty.map(|v| v * factor),
            upper_uncertainty: self.upper_uncertainty.map(|v| v * factor),
            confidence_level: self.confidence_level,
        }
    }
}

/// A value with its error bounds. Either part may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity<T> {
    /// The value itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    /// Error bounds on the value.
    #[serde(default, skip_serializing_if = "QuantityErrors::is_empty")]
    pub errors: QuantityErrors,
}

impl<T> Default for Quantity<T> {
    fn default() -> Self {
        Self {
            value: None,
            errors: QuantityErrors::default(),
        }
    }
}

impl<T> Quantity<T> {
    /// A quantity with a value and no error bounds.
    pub fn from_value(value: T) -> Self {
        Self {
            value: Some(value),
            errors: QuantityErrors::default(),
        }
    }
}
