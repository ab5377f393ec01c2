use std::env;
use std::net::SocketAddr;

use crate::error::{config_error, Error};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:8100,http://localhost:4200";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Points are kept in memory when unset.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| config_error("LISTEN_ADDR"))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse()
                .ok()
                .filter(|&n: &u32| n > 0)
                .ok_or_else(|| config_error("DATABASE_MAX_CONNECTIONS"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cors_allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    move |name| {
        vars.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

#[test]
fn defaults_test() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
    assert_eq!(config.database_url, None);
    assert_eq!(config.database_max_connections, 5);
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://localhost:8100", "http://localhost:4200"]
    );
}

#[test]
fn overrides_test() {
    let config = Config::from_lookup(lookup_from(&[
        ("LISTEN_ADDR", "0.0.0.0:3000"),
        ("DATABASE_URL", "postgresql://localexplorer@localhost/localexplorer"),
        ("DATABASE_MAX_CONNECTIONS", "12"),
        ("CORS_ALLOWED_ORIGINS", " https://explore.example.com , ,"),
    ]))
    .unwrap();

    assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgresql://localexplorer@localhost/localexplorer")
    );
    assert_eq!(config.database_max_connections, 12);
    assert_eq!(config.cors_allowed_origins, vec!["https://explore.example.com"]);
}

#[test]
fn malformed_values_test() {
    let err = Config::from_lookup(lookup_from(&[("LISTEN_ADDR", "localhost")])).unwrap_err();
    assert_eq!(err.code, 6);

    let err =
        Config::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
    assert_eq!(err.code, 6);

    let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
    assert_eq!(config.database_url, None);
}
