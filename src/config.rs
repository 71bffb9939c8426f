use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ResolveError;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_GRAPH_VERSION: &str = "v19.0";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Resolver configuration. Loaded from TOML, then overlaid with environment
/// variables; credentials are validated once via [`Config::credentials`].
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub app_id: Option<String>,
    pub client_token: Option<String>,
    pub access_token: Option<String>,
    pub graph_base_url: String,
    pub graph_version: String,
    pub timeout_ms: u64,
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            client_token: None,
            access_token: None,
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            graph_version: DEFAULT_GRAPH_VERSION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            concurrency: 1,
            user_agent: concat!("reelgrid/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The three credentials, all known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub client_token: String,
    pub access_token: String,
}

impl Credentials {
    /// `app_id|client_token`, the oEmbed app access token.
    pub fn app_token(&self) -> String { format!("{}|{}", self.app_id, self.client_token) }
}

impl Config {
    /// Read `path`, or the default config file if it exists, then apply the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        let mut cfg = match file {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Overlay values from an environment lookup. Unparseable numbers are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where F: Fn(&str) -> Option<String> {
        if let Some(v) = lookup("IG_APP_ID") {
            self.app_id = Some(v);
        }
        if let Some(v) = lookup("IG_CLIENT_TOKEN") {
            self.client_token = Some(v);
        }
        if let Some(v) = lookup("IG_ACCESS_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = lookup("REELGRID_GRAPH_BASE_URL") {
            self.graph_base_url = v;
        }
        if let Some(v) = lookup("REELGRID_GRAPH_VERSION") {
            self.graph_version = v;
        }
        if let Some(v) = lookup("REELGRID_TIMEOUT_MS").and_then(|s| s.parse().ok()) {
            self.timeout_ms = v;
        }
        if let Some(v) = lookup("REELGRID_CONCURRENCY").and_then(|s| s.parse().ok()) {
            self.concurrency = v;
        }
    }

    /// Empty values count as missing.
    pub fn credentials(&self) -> Result<Credentials, ResolveError> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        let app_id = present(&self.app_id);
        let client_token = present(&self.client_token);
        let access_token = present(&self.access_token);
        match (app_id, client_token, access_token) {
            (Some(app_id), Some(client_token), Some(access_token)) => Ok(Credentials { app_id, client_token, access_token }),
            (a, c, t) => {
                let missing: Vec<&str> = [(a.is_none(), "IG_APP_ID"), (c.is_none(), "IG_CLIENT_TOKEN"), (t.is_none(), "IG_ACCESS_TOKEN")]
                    .into_iter()
                    .filter_map(|(gone, key)| gone.then_some(key))
                    .collect();
                Err(ResolveError::Configuration(missing.join("/")))
            }
        }
    }

    pub fn concurrency(&self) -> usize { self.concurrency.max(1) }

    /// Per-request timeout. `0` means unset and falls back to the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            0 => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "reelgrid", "reelgrid").map(|d| d.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_point_at_graph_v19() {
        let cfg = Config::default();
        assert_eq!(cfg.graph_base_url, "https://graph.facebook.com");
        assert_eq!(cfg.graph_version, "v19.0");
        assert_eq!(cfg.concurrency(), 1);
    }

    #[test]
    fn env_overrides_file_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "app_id = \"file-app\"\nclient_token = \"file-client\"\ntimeout_ms = 500\n").unwrap();

        let mut cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.timeout_ms, 500);
        assert_eq!(cfg.graph_version, "v19.0");

        cfg.apply_env(env(&[("IG_APP_ID", "env-app"), ("IG_ACCESS_TOKEN", "tok"), ("REELGRID_CONCURRENCY", "nope")]));
        let creds = cfg.credentials().unwrap();
        assert_eq!(creds.app_id, "env-app");
        assert_eq!(creds.app_token(), "env-app|file-client");
        assert_eq!(cfg.concurrency, 1);
    }

    #[test]
    fn invalid_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "timeout_ms = \"soon\"").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn each_missing_credential_is_a_configuration_error() {
        let full = [("IG_APP_ID", "a"), ("IG_CLIENT_TOKEN", "c"), ("IG_ACCESS_TOKEN", "t")];
        for skip in 0..full.len() {
            let pairs: Vec<_> = full.iter().enumerate().filter(|(i, _)| *i != skip).map(|(_, p)| *p).collect();
            let mut cfg = Config::default();
            cfg.apply_env(env(&pairs));
            let err = cfg.credentials().unwrap_err();
            assert!(err.is_configuration());
            assert!(err.to_string().contains(full[skip].0));
        }
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("IG_APP_ID", " "), ("IG_CLIENT_TOKEN", "c"), ("IG_ACCESS_TOKEN", "t")]));
        assert_eq!(cfg.credentials().unwrap_err().to_string(), "Missing IG_APP_ID");
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("REELGRID_TIMEOUT_MS", "0")]));
        assert_eq!(cfg.timeout_ms, 0);
        assert_eq!(cfg.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));

        cfg.apply_env(env(&[("REELGRID_TIMEOUT_MS", "250")]));
        assert_eq!(cfg.timeout(), Duration::from_millis(250));
    }
}
