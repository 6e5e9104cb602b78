use std::{env, fs, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_PAGE_ROWS: usize = 1000;

const ENV_URL: &str = "SUPABASE_URL";
const ENV_KEY: &str = "SUPABASE_ANON_KEY";
const ENV_URL_ALIAS: &str = "VITE_SUPABASE_URL";
const ENV_KEY_ALIAS: &str = "VITE_SUPABASE_ANON_KEY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Rows requested per HTTP round trip; servers usually cap this.
    pub page_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            page_rows: DEFAULT_PAGE_ROWS,
        }
    }
}

impl AppConfig {
    /// Endpoint and key, when both are present and non-blank.
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        let url = self.supabase_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((url, key))
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "url")]
    supabase_url: Option<String>,
    #[serde(alias = "anon_key")]
    supabase_anon_key: Option<String>,
    page_rows: Option<usize>,
}

/// Read `config.json` from the working directory, then apply environment overrides.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_file(Path::new(CONFIG_FILE));
    apply_env_overrides(&mut cfg, |name| env::var(name).ok());
    cfg
}

pub fn load_config_file(path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if parsed.supabase_url.is_some() {
                    cfg.supabase_url = parsed.supabase_url;
                }
                if parsed.supabase_anon_key.is_some() {
                    cfg.supabase_anon_key = parsed.supabase_anon_key;
                }
                if let Some(n) = parsed.page_rows {
                    if n == 0 {
                        warn!("page_rows must be positive; keeping {}", cfg.page_rows);
                    } else {
                        cfg.page_rows = n;
                    }
                }
                info!("Loaded config from {}", path.display());
            }
            Err(err) => {
                warn!("Failed to parse {} ({}). Using defaults.", path.display(), err);
            }
        },
        Err(_) => {
            info!("No {} found; using environment only", path.display());
        }
    }

    cfg
}

/// Environment wins over the file. The `VITE_` names are accepted for
/// deployments that share an env file with the web build.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |primary: &str, alias: &str| {
        lookup(primary)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup(alias).filter(|v| !v.trim().is_empty()))
    };

    if let Some(url) = pick(ENV_URL, ENV_URL_ALIAS) {
        cfg.supabase_url = Some(url);
    }
    if let Some(key) = pick(ENV_KEY, ENV_KEY_ALIAS) {
        cfg.supabase_anon_key = Some(key);
    }
}
