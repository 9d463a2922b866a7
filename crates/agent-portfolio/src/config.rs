//! Configuration for the analysis pipeline

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model for both generation calls
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for pipeline runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model used for news sentiment and the report
    pub model: String,

    /// Maximum tokens per generation call
    pub max_tokens: usize,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,

    /// Number of news items requested from the model
    pub news_item_count: usize,

    /// Simulated latency of the price fetch
    pub data_fetch_delay: Duration,

    /// Simulated latency of the risk calculation
    pub quant_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 8192,
            temperature: None,
            news_item_count: 3,
            data_fetch_delay: Duration::from_millis(1000),
            quant_delay: Duration::from_millis(1500),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(PipelineError::Config("model must not be empty".to_string()));
        }

        if self.max_tokens == 0 {
            return Err(PipelineError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.news_item_count == 0 {
            return Err(PipelineError::Config(
                "news_item_count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    news_item_count: Option<usize>,
    data_fetch_delay: Option<Duration>,
    quant_delay: Option<Duration>,
}

impl PipelineConfigBuilder {
    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Read the model from `GEMINI_MODEL` if set
    pub fn from_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.model = Some(model);
        }
        self
    }

    /// Set max tokens per call
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set how many news items to request
    pub fn news_item_count(mut self, count: usize) -> Self {
        self.news_item_count = Some(count);
        self
    }

    /// Set the simulated price-fetch delay
    pub fn data_fetch_delay(mut self, delay: Duration) -> Self {
        self.data_fetch_delay = Some(delay);
        self
    }

    /// Set the simulated risk-calculation delay
    pub fn quant_delay(mut self, delay: Duration) -> Self {
        self.quant_delay = Some(delay);
        self
    }

    /// Skip both simulated delays
    pub fn no_delays(self) -> Self {
        self.data_fetch_delay(Duration::ZERO).quant_delay(Duration::ZERO)
    }

    /// Build the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();

        let config = PipelineConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.or(defaults.temperature),
            news_item_count: self.news_item_count.unwrap_or(defaults.news_item_count),
            data_fetch_delay: self.data_fetch_delay.unwrap_or(defaults.data_fetch_delay),
            quant_delay: self.quant_delay.unwrap_or(defaults.quant_delay),
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
        let config = PipelineConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.news_item_count, 3);
        assert_eq!(config.data_fetch_delay, Duration::from_millis(1000));
        assert_eq!(config.quant_delay, Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .model("gemini-2.5-pro")
            .temperature(0.2)
            .no_delays()
            .build()
            .unwrap();

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.data_fetch_delay, Duration::ZERO);
        assert_eq!(config.quant_delay, Duration::ZERO);
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let result = PipelineConfig::builder().model("  ").build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_items() {
        let config = PipelineConfig {
            news_item_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
