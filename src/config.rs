//! Process configuration
//!
//! Every setting comes from the environment (a `.env` file is loaded first
//! when present). Command-line flags of the same name override it.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::store::StoreSettings;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Document store connection string (e.g. ws://127.0.0.1:8000). When
    /// unset the server still starts and every query fails.
    #[arg(long, env = "DB_URL")]
    pub db_url: Option<String>,

    /// Namespace holding the weather database
    #[arg(long, env = "DB_NAMESPACE", default_value = "weather")]
    pub db_namespace: String,

    /// Database holding the weather table
    #[arg(long, env = "DB_DATABASE", default_value = "weather")]
    pub db_database: String,

    /// Table of weather records
    #[arg(long, env = "DB_TABLE", default_value = "weather")]
    pub db_table: String,

    /// Root user, only used together with --db-pass
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// HTTP listen address
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_addr: IpAddr,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn store_settings(&self) -> StoreSettings {
        let credentials = match (&self.db_user, &self.db_pass) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };

        StoreSettings {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            table: self.db_table.clone(),
            credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["weather-api", "--db-url", "ws://db:8000"]).unwrap();

        if std::env::var_os("PORT").is_none() {
            assert_eq!(config.listen_addr(), "0.0.0.0:5001".parse().unwrap());
        }

        let settings = config.store_settings();
        assert_eq!(settings.url.as_deref(), Some("ws://db:8000"));
        assert_eq!(settings.namespace, "weather");
        assert_eq!(settings.database, "weather");
        assert_eq!(settings.table, "weather");
        assert!(settings.credentials.is_none());
    }

    #[test]
    fn test_missing_db_url_still_parses() {
        if std::env::var_os("DB_URL").is_some() {
            return;
        }

        let config = Config::try_parse_from(["weather-api"]).unwrap();

        assert!(config.db_url.is_none());
        assert!(config.store_settings().url.is_none());
    }

    #[test]
    fn test_credentials_require_user_and_pass() {
        let only_user = Config::try_parse_from([
            "weather-api",
            "--db-url",
            "ws://db:8000",
            "--db-user",
            "root",
        ])
        .unwrap();
        assert!(only_user.store_settings().credentials.is_none());

        let both = Config::try_parse_from([
            "weather-api",
            "--db-url",
            "ws://db:8000",
            "--db-user",
            "root",
            "--db-pass",
            "secret",
        ])
        .unwrap();
        assert_eq!(
            both.store_settings().credentials,
            Some(("root".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_port_and_bind_override() {
        let config = Config::try_parse_from([
            "weather-api",
            "--db-url",
            "mem://",
            "--port",
            "8080",
            "--bind-addr",
            "127.0.0.1",
        ])
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse().unwrap());
    }
}
