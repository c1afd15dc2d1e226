use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "simple-interest", version, about = "Serve the simple interest calculator form")]
pub struct Cli {
    /// Address to listen on (host:port), overrides the config file
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Path to the config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Apply command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["simple-interest"]).unwrap();
        assert!(cli.bind.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.config_path(), Config::config_path());
    }

    #[test]
    fn test_bind_override() {
        let cli = Cli::try_parse_from(["simple-interest", "--bind", "0.0.0.0:8080", "-v"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert!(cli.verbose);
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from(["simple-interest", "--config", "/tmp/si.toml"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/si.toml"));
    }
}
