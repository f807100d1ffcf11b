//! Settings structures for DocSearch-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub llm: LlmSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables. Engine and LLM variables keep the
    /// names the upstream services are conventionally configured with.
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("DOCSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("DOCSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ELASTICSEARCH_HOST") {
            self.engine.host = val;
        }
        if let Ok(val) = std::env::var("ELASTICSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.engine.port = port;
            }
        }
        if let Ok(val) = std::env::var("ELASTICSEARCH_USERNAME") {
            self.engine.username = Some(val);
        }
        if let Ok(val) = std::env::var("ELASTICSEARCH_PASSWORD") {
            self.engine.password = Some(val);
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = val;
        }
        if let Ok(val) = std::env::var("MAX_SEARCH_RESULTS") {
            if let Ok(max) = val.parse() {
                self.search.max_results = max;
            }
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Search-engine (Elasticsearch) connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// URL scheme, http or https
    pub scheme: String,
    /// Engine host name
    pub host: String,
    /// Engine port
    pub port: u16,
    /// Index holding the documents
    pub index: String,
    /// Optional basic-auth username
    pub username: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Connection timeout in seconds
    pub connect_timeout: f64,
    /// Startup ping attempts before giving up
    pub max_retries: u32,
    /// Delay between startup ping attempts in seconds
    pub retry_delay: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "elasticsearch".to_string(),
            port: 9200,
            index: "documents".to_string(),
            username: None,
            password: None,
            request_timeout: 10.0,
            connect_timeout: 5.0,
            max_retries: 3,
            retry_delay: 2.0,
        }
    }
}

impl EngineSettings {
    /// Base URL of the engine, e.g. `http://elasticsearch:9200`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.connect_timeout)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs_f64(self.retry_delay)
    }
}

/// Completion-provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// API key; empty means the summarize endpoint is unavailable
    pub api_key: String,
    /// Model to request completions from
    pub model: String,
    /// Completion token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Result count used when a query does not specify max_results
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.engine.host, "elasticsearch");
        assert_eq!(settings.engine.port, 9200);
        assert_eq!(settings.engine.index, "documents");
        assert_eq!(settings.engine.max_retries, 3);
        assert_eq!(settings.llm.model, "gpt-3.5-turbo");
        assert!(settings.llm.api_key.is_empty());
        assert_eq!(settings.search.max_results, 10);
    }

    #[test]
    fn base_url_formats_scheme_host_port() {
        let engine = EngineSettings {
            host: "localhost".to_string(),
            port: 9201,
            ..Default::default()
        };
        assert_eq!(engine.base_url(), "http://localhost:9201");
    }

    #[test]
    fn partial_yaml_keeps_defaults_elsewhere() {
        let yaml = r#"
engine:
  host: es.internal
search:
  max_results: 25
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.engine.host, "es.internal");
        assert_eq!(settings.engine.port, 9200);
        assert_eq!(settings.search.max_results, 25);
        assert_eq!(settings.server.port, 8080);
    }
}
