//! Configuration management

use anyhow::Context;
use httpq_core::{binding::validate_bindings, QueueBinding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Server configuration, built once at startup and never mutated while serving
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Interface to bind, empty for all interfaces
    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log destination: empty or `-` for stdout, otherwise a file appended to
    #[serde(default)]
    pub logpath: String,

    #[serde(default = "default_queues")]
    pub queues: Vec<QueueBinding>,

    /// Largest accepted POST body, unlimited when unset
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            logpath: String::new(),
            queues: default_queues(),
            max_body_bytes: None,
        }
    }
}

fn default_port() -> u16 {
    8888
}

fn default_queues() -> Vec<QueueBinding> {
    vec![QueueBinding::new("/", 0)]
}

impl Config {
    /// Load configuration from an optional JSON file and `HTTPQ_*` environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(true),
            );
        }

        let config = builder
            .add_source(config::Environment::with_prefix("HTTPQ").try_parsing(true))
            .build()
            .context("failed to read configuration")?
            .try_deserialize::<Config>()
            .context("invalid configuration")?;

        validate_bindings(&config.queues).context("invalid queue configuration")?;
        Ok(config)
    }

    /// `host:port` to listen on
    pub fn listen_addr(&self) -> String {
        match self.host.as_str() {
            "" => format!("0.0.0.0:{}", self.port),
            host if host.contains(':') && !host.starts_with('[') => {
                format!("[{}]:{}", host, self.port)
            }
            host => format!("{}:{}", host, self.port),
        }
    }

    pub fn log_target(&self) -> LogTarget {
        match self.logpath.as_str() {
            "" | "-" => LogTarget::Stdout,
            path => LogTarget::File(PathBuf::from(path)),
        }
    }
}
