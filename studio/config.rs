use anyhow::{Context, Result};

/// Runtime settings for the studio server, read from the environment.
///
/// | variable               | default         |
/// |------------------------|-----------------|
/// | `HOST`                 | `0.0.0.0`       |
/// | `PORT`                 | `8080`          |
/// | `STUDIO_WORKERS`       | `2 * cpus + 1`  |
/// | `STUDIO_MAX_UPLOAD_MB` | `16`            |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_upload_bytes: usize,
}

impl StudioConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().with_context(|| format!("invalid PORT: {v:?}"))?,
            None => 8080,
        };

        let workers = match lookup("STUDIO_WORKERS") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .with_context(|| format!("invalid STUDIO_WORKERS: {v:?}"))?,
            None => default_workers(),
        };

        let max_upload_mb = match lookup("STUDIO_MAX_UPLOAD_MB") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .with_context(|| format!("invalid STUDIO_MAX_UPLOAD_MB: {v:?}"))?,
            None => 16,
        };

        Ok(StudioConfig {
            host,
            port,
            workers,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    cpus * 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = StudioConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:8080");
        assert_eq!(cfg.max_upload_bytes, 16 * 1024 * 1024);
        assert!(cfg.workers >= 3);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = StudioConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("STUDIO_WORKERS", "4"),
            ("STUDIO_MAX_UPLOAD_MB", "2"),
        ]))
        .unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:9000");
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.max_upload_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(StudioConfig::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(StudioConfig::from_lookup(lookup(&[("STUDIO_WORKERS", "0")])).is_err());
    }
}
