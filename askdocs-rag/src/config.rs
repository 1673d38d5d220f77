//! Store connection configuration, read fail-fast from the environment.

use crate::error::{RagError, Result};

/// Connection and credential configuration for the vector store and the
/// embedding backend.
///
/// Construction fails immediately if any required variable is absent, so
/// no operation can proceed with partial configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Qdrant endpoint URL (`QDRANT_URL`).
    pub url: String,
    /// Qdrant API key (`QDRANT_API_KEY`).
    pub api_key: String,
    /// Deployment environment identifier (`QDRANT_ENVIRONMENT`), carried
    /// for log context.
    pub environment: String,
    /// OpenAI API key used for embeddings (`OPENAI_API_KEY`).
    pub openai_api_key: String,
}

impl StoreConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary lookup, for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            url: require(&lookup, "QDRANT_URL")?,
            api_key: require(&lookup, "QDRANT_API_KEY")?,
            environment: require(&lookup, "QDRANT_ENVIRONMENT")?,
            openai_api_key: require(&lookup, "OPENAI_API_KEY")?,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RagError::Config(format!("Missing `{key}` environment variable")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_lookup(key: &str) -> Option<String> {
        match key {
            "QDRANT_URL" => Some("http://localhost:6334".into()),
            "QDRANT_API_KEY" => Some("qd-key".into()),
            "QDRANT_ENVIRONMENT" => Some("dev".into()),
            "OPENAI_API_KEY" => Some("sk-test".into()),
            _ => None,
        }
    }

    #[test]
    fn full_configuration_constructs() {
        let config = StoreConfig::from_lookup(full_lookup).unwrap();
        assert_eq!(config.url, "http://localhost:6334");
        assert_eq!(config.environment, "dev");
    }

    #[test]
    fn each_missing_variable_fails_construction() {
        for missing in ["QDRANT_URL", "QDRANT_API_KEY", "QDRANT_ENVIRONMENT", "OPENAI_API_KEY"] {
            let err = StoreConfig::from_lookup(|key| {
                if key == missing { None } else { full_lookup(key) }
            })
            .unwrap_err();
            let text = err.to_string();
            assert!(text.contains(missing), "error for {missing} was: {text}");
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = StoreConfig::from_lookup(|key| {
            if key == "QDRANT_API_KEY" { Some(String::new()) } else { full_lookup(key) }
        })
        .unwrap_err();
        assert!(err.to_string().contains("QDRANT_API_KEY"));
    }
}
