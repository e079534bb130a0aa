//! Configuration for sample generation

use crate::error::Error;

/// Default configuration constants
pub mod defaults {
    /// Ranges kept per category before trimming an unbounded one
    pub const SAMPLE_LIMIT: usize = 8;

    /// Distinct values at which a category stops being judged bounded
    pub const UNBOUNDED_LIMIT: usize = 20;

    /// Exponent samples appended to a rendered category
    pub const MAX_EXPONENT_SAMPLES: usize = 5;
}

/// Sample generation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub(crate) sample_limit: usize,
    pub(crate) unbounded_limit: usize,
    pub(crate) max_exponent_samples: usize,
    pub(crate) escalate_mismatches: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_limit: defaults::SAMPLE_LIMIT,
            unbounded_limit: defaults::UNBOUNDED_LIMIT,
            max_exponent_samples: defaults::MAX_EXPONENT_SAMPLES,
            escalate_mismatches: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Ranges kept per unbounded category
    pub fn sample_limit(&self) -> usize {
        self.sample_limit
    }

    /// Distinct-value threshold for the empirical boundedness check
    pub fn unbounded_limit(&self) -> usize {
        self.unbounded_limit
    }

    /// Exponent samples shown per category
    pub fn max_exponent_samples(&self) -> usize {
        self.max_exponent_samples
    }

    /// Whether rule/observation mismatches abort generation
    pub fn escalate_mismatches(&self) -> bool {
        self.escalate_mismatches
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.sample_limit == 0 {
            return Err(Error::Configuration(
                "sample_limit must be greater than 0".into(),
            ));
        }

        if self.unbounded_limit == 0 {
            return Err(Error::Configuration(
                "unbounded_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    sample_limit: Option<usize>,
    unbounded_limit: Option<usize>,
    max_exponent_samples: Option<usize>,
    escalate_mismatches: Option<bool>,
}

impl GeneratorConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-category range quota
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    /// Set the distinct-value threshold
    pub fn unbounded_limit(mut self, limit: usize) -> Self {
        self.unbounded_limit = Some(limit);
        self
    }

    /// Set how many exponent samples are rendered
    pub fn max_exponent_samples(mut self, count: usize) -> Self {
        self.max_exponent_samples = Some(count);
        self
    }

    /// Abort on mismatches (`true`) or record them as diagnostics (`false`)
    pub fn escalate_mismatches(mut self, escalate: bool) -> Self {
        self.escalate_mismatches = Some(escalate);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<GeneratorConfig, Error> {
        let mut config = GeneratorConfig::default();

        if let Some(limit) = self.sample_limit {
            config.sample_limit = limit;
        }

        if let Some(limit) = self.unbounded_limit {
            config.unbounded_limit = limit;
        }

        if let Some(count) = self.max_exponent_samples {
            config.max_exponent_samples = count;
        }

        if let Some(escalate) = self.escalate_mismatches {
            config.escalate_mismatches = escalate;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.sample_limit(), 8);
        assert_eq!(config.unbounded_limit(), 20);
        assert_eq!(config.max_exponent_samples(), 5);
        assert!(config.escalate_mismatches());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::builder()
            .sample_limit(4)
            .unbounded_limit(10)
            .escalate_mismatches(false)
            .build()
            .unwrap();
        assert_eq!(config.sample_limit(), 4);
        assert_eq!(config.unbounded_limit(), 10);
        assert!(!config.escalate_mismatches());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(matches!(
            GeneratorConfig::builder().sample_limit(0).build(),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            GeneratorConfig::builder().unbounded_limit(0).build(),
            Err(Error::Configuration(_))
        ));
    }
}
