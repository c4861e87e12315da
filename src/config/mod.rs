use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let config_path = default_config_path();
        let mut cfg = Self::from_file(&config_path);
        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                cfg.inner.insert(k, v);
            }
        }
        cfg
    }

    /// Load from a specific rc file without the env overlay.
    pub fn from_file(path: &Path) -> Self {
        let mut map = default_map();
        if path.exists() {
            if let Ok(file) = fs::File::open(path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }
        Self {
            inner: map,
            config_path: path.to_path_buf(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "PISTON_API_URL",
        "REQUEST_TIMEOUT",
        "DEFAULT_LANGUAGE",
        "DEFAULT_THEME",
    ];

    KEYS.contains(&k) || k.starts_with("RUNPAD_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("runpad").join(".runpadrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(
        "PISTON_API_URL".into(),
        "https://emkc.org/api/v2/piston".into(),
    );
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("DEFAULT_LANGUAGE".into(), "javascript".into());
    m.insert("DEFAULT_THEME".into(), "light".into());
    m
}
