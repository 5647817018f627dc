//! Configuration types for the analysis core.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic analyzer setup.

use crate::types::{CorrelationMethod, OutlierMethod};
use serde::{Deserialize, Serialize};

/// Default IQR fence multiplier (Tukey's fences).
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default absolute z-score above which a value is flagged.
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// Configuration for [`DataAnalyzer`](crate::DataAnalyzer).
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::config::AnalysisConfig;
/// use lex_eda::{CorrelationMethod, OutlierMethod};
///
/// let config = AnalysisConfig::builder()
///     .correlation_method(CorrelationMethod::Spearman)
///     .outlier_method(OutlierMethod::ZScore)
///     .zscore_threshold(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Correlation method used by [`generate_report`](crate::DataAnalyzer::generate_report).
    /// Default: Pearson
    pub correlation_method: CorrelationMethod,

    /// Outlier rule used by [`generate_report`](crate::DataAnalyzer::generate_report).
    /// Default: Iqr
    pub outlier_method: OutlierMethod,

    /// Multiplier `k` for the IQR fences `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Absolute z-score above which a value is an outlier.
    /// Default: 3.0
    pub zscore_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation_method: CorrelationMethod::default(),
            outlier_method: OutlierMethod::default(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(ConfigValidationError::NonPositive {
                field: "iqr_multiplier".to_string(),
                value: self.iqr_multiplier,
            });
        }

        if !(self.zscore_threshold.is_finite() && self.zscore_threshold > 0.0) {
            return Err(ConfigValidationError::NonPositive {
                field: "zscore_threshold".to_string(),
                value: self.zscore_threshold,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be a finite number greater than 0)")]
    NonPositive { field: String, value: f64 },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    correlation_method: Option<CorrelationMethod>,
    outlier_method: Option<OutlierMethod>,
    iqr_multiplier: Option<f64>,
    zscore_threshold: Option<f64>,
}

impl AnalysisConfigBuilder {
    /// Set the correlation method used in the full report.
    pub fn correlation_method(mut self, method: CorrelationMethod) -> Self {
        self.correlation_method = Some(method);
        self
    }

    /// Set the outlier detection rule used in the full report.
    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.outlier_method = Some(method);
        self
    }

    /// Set the IQR fence multiplier.
    ///
    /// # Arguments
    /// * `multiplier` - Positive factor applied to the IQR (e.g., 1.5, or 3.0 for "far out")
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the z-score threshold.
    pub fn zscore_threshold(mut self, threshold: f64) -> Self {
        self.zscore_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            correlation_method: self.correlation_method.unwrap_or_default(),
            outlier_method: self.outlier_method.unwrap_or_default(),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER),
            zscore_threshold: self.zscore_threshold.unwrap_or(DEFAULT_ZSCORE_THRESHOLD),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.correlation_method, CorrelationMethod::Pearson);
        assert_eq!(config.outlier_method, OutlierMethod::Iqr);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.zscore_threshold, 3.0);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .correlation_method(CorrelationMethod::Kendall)
            .outlier_method(OutlierMethod::ZScore)
            .iqr_multiplier(3.0)
            .zscore_threshold(2.0)
            .build()
            .unwrap();

        assert_eq!(config.correlation_method, CorrelationMethod::Kendall);
        assert_eq!(config.outlier_method, OutlierMethod::ZScore);
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.zscore_threshold, 2.0);
    }

    #[test]
    fn test_validation_rejects_non_positive_multiplier() {
        let result = AnalysisConfig::builder().iqr_multiplier(0.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::NonPositive { ref field, .. } if field == "iqr_multiplier"
        ));
    }

    #[test]
    fn test_validation_rejects_nan_threshold() {
        let result = AnalysisConfig::builder().zscore_threshold(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "correlation_method": "spearman",
            "outlier_method": "zscore",
            "iqr_multiplier": 2.0,
            "zscore_threshold": 2.5
        }"#;

        let config: AnalysisConfig = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(config.correlation_method, CorrelationMethod::Spearman);
        assert_eq!(config.outlier_method, OutlierMethod::ZScore);
        assert_eq!(config.iqr_multiplier, 2.0);
        assert_eq!(config.zscore_threshold, 2.5);
    }
}
