use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/planner.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local { data_path: PathBuf },
    Kv { base_url: String, token: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub backend: Backend,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let backend = match (non_empty("KV_REST_API_URL"), non_empty("KV_REST_API_TOKEN")) {
            (Some(base_url), Some(token)) => Backend::Kv { base_url, token },
            _ => Backend::Local {
                data_path: non_empty("APP_DATA_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            },
        };

        Self { port, backend }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
