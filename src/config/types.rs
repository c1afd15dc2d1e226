use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the form server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// How long to wait for open connections on shutdown (default: 10).
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

/// Presentation settings for the form page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Page heading.
    #[serde(default = "default_title")]
    pub title: String,
    /// Prefix shown before amounts, e.g. "$" or "€".
    #[serde(default)]
    pub currency_symbol: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_shutdown_timeout() -> u64 {
    10
}

fn default_title() -> String {
    "Simple Interest Calculator".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_symbol: String::new(),
        }
    }
}
