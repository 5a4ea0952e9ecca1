use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { snapshot_path: default_snapshot_path() }
    }
}

fn default_snapshot_path() -> String { "data/registry.json".into() }

/// Which console notifier variant the server installs.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    #[default]
    Blue,
    Yellow,
}

impl std::str::FromStr for NotifierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "yellow" => Ok(Self::Yellow),
            other => Err(anyhow!("unknown notifier kind `{other}` (expected blue|yellow)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct NotifierConfig {
    #[serde(default)]
    pub kind: NotifierKind,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content).with_context(|| format!("invalid config file {path}"))
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file first; only when it does not exist, build from env vars.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env()?,
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()
            .with_context(|| format!("invalid config file {path}"))?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `SNAPSHOT_PATH`, `NOTIFIER_KIND`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            cfg.storage.snapshot_path = path;
        }
        if let Ok(kind) = std::env::var("NOTIFIER_KIND") {
            cfg.notifier.kind = kind.parse()?;
        }
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        // 空路径回退到默认快照文件
        if self.snapshot_path.trim().is_empty() {
            self.snapshot_path = default_snapshot_path();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            snapshot_path = "/var/lib/registry/people.json"

            [notifier]
            kind = "yellow"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.snapshot_path, "/var/lib/registry/people.json");
        assert_eq!(cfg.notifier.kind, NotifierKind::Yellow);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.storage.snapshot_path, "data/registry.json");
        assert_eq!(cfg.notifier.kind, NotifierKind::Blue);
    }

    #[test]
    fn normalize_fills_blanks_and_rejects_port_zero() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.storage.snapshot_path = "".into();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.snapshot_path, "data/registry.json");

        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn temp_config(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("registry_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn existing_but_invalid_file_is_an_error() {
        for content in [
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n[notifier]\nkind = \"green\"",
            "[server\nport = 9000",
            "[server]\nhost = \"0.0.0.0\"\nport = 0",
        ] {
            let path = temp_config(content);
            let res = AppConfig::load_or_env_from(&path.display().to_string());
            assert!(res.is_err(), "accepted {content:?}");
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn config_path_pointing_at_invalid_file_fails() {
        let path = temp_config("[server]\nhost = \"0.0.0.0\"\nport = 9000\n[notifier]\nkind = \"green\"");
        std::env::set_var("CONFIG_PATH", &path);
        let res = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn valid_file_is_used() {
        let path = temp_config("[server]\nhost = \"0.0.0.0\"\nport = 9000\n[notifier]\nkind = \"yellow\"");
        let cfg = AppConfig::load_or_env_from(&path.display().to_string()).unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.notifier.kind, NotifierKind::Yellow);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back() {
        let path = std::env::temp_dir().join(format!("registry_config_{}.toml", uuid::Uuid::new_v4()));
        assert!(AppConfig::load_or_env_from(&path.display().to_string()).is_ok());
    }

    #[test]
    fn unknown_notifier_kind_is_rejected() {
        assert!(load_from_str("[notifier]\nkind = \"green\"").is_err());
        assert!("green".parse::<NotifierKind>().is_err());
        assert_eq!(" Yellow ".parse::<NotifierKind>().unwrap(), NotifierKind::Yellow);
    }
}
