// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::{AppState, SharedState};
pub use types::{Config, HealthConfig, PerformanceConfig};

/// Default config file (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the config file,
    /// `LEXICON_*` environment variables (`LEXICON_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.backlog", 128)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "lexicon/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("data.path", "lexicon.toml")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("LEXICON")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the config path from command line arguments
    ///
    /// Accepts `--config <path>`, `-c <path>` or a single positional path.
    pub fn path_from_args<I>(args: I) -> String
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    if let Some(path) = args.next() {
                        return path;
                    }
                }
                other if !other.starts_with('-') => return other.to_string(),
                _ => {}
            }
        }
        DEFAULT_CONFIG_PATH.to_string()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    use types::{DataConfig, HttpConfig, LoggingConfig, ServerConfig};

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            backlog: 128,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            show_headers: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        },
        http: HttpConfig {
            server_name: "lexicon-test".to_string(),
            enable_cors: false,
        },
        health: HealthConfig::default(),
        data: DataConfig {
            path: "lexicon.toml".into(),
        },
    }
}
