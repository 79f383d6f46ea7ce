use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the resume slot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    File { dir: PathBuf },
    Memory,
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = match var("RESUME_STORAGE").as_deref().unwrap_or("file") {
            "file" => StorageBackend::File {
                dir: var("RESUME_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./data")),
            },
            "memory" => StorageBackend::Memory,
            "redis" => StorageBackend::Redis {
                url: var("REDIS_URL").with_context(|| {
                    "Required environment variable 'REDIS_URL' is not set (RESUME_STORAGE=redis)"
                })?,
            },
            other => bail!("RESUME_STORAGE must be one of file, memory, redis (got '{other}')"),
        };

        Ok(Config {
            storage,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                dir: PathBuf::from("./data")
            }
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_memory_backend() {
        let config = config_from(&[("RESUME_STORAGE", "memory"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_redis_requires_url() {
        assert!(config_from(&[("RESUME_STORAGE", "redis")]).is_err());
        let config = config_from(&[
            ("RESUME_STORAGE", "redis"),
            ("REDIS_URL", "redis://127.0.0.1/"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::Redis {
                url: "redis://127.0.0.1/".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_unknown_backend_and_bad_port() {
        assert!(config_from(&[("RESUME_STORAGE", "s3")]).is_err());
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }
}
