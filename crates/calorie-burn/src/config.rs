//! Process configuration read from the environment.

use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_STATIC_DIR: &str = "./build";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Verbose logging (`DEBUG`).
    pub debug: bool,
    /// The one origin allowed to make cross-origin requests (`CORS_ORIGIN`).
    pub cors_origin: String,
    /// Directory holding the built front-end (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            debug: false,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Missing or
    /// unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let debug = lookup("DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.debug);

        let cors_origin = lookup("CORS_ORIGIN")
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(defaults.cors_origin);

        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Self {
            port,
            debug,
            cors_origin,
            static_dir,
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
