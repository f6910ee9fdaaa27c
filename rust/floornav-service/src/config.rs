use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use floornav_core::SearchOptions;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Location document (`map.json`) loaded at startup and on reload.
    pub graph_path: Option<PathBuf>,
    pub options: SearchOptions,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("FLOORNAV_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("FLOORNAV_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let graph_path = env::var("FLOORNAV_GRAPH").ok().map(PathBuf::from);

        let mut options = SearchOptions::default();
        if let Some(v) = env_parse::<u64>("FLOORNAV_MAX_EXPANSIONS") { options.max_expansions = v; }
        if let Some(v) = env_parse::<u64>("FLOORNAV_TIMEOUT_MS") { options.timeout_ms = v; }
        if let Some(v) = env_parse::<usize>("FLOORNAV_CACHE_CAPACITY") { options.cache_capacity = v; }

        Ok(Self { host, port, graph_path, options })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}
