//! Configuration types for tome.
//!
//! [`Config::load`] reads `~/.config/tome/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[engine]
base_url     = "http://127.0.0.1:9200"
index        = "books"
timeout_secs = 10

[storage]
base_url = "http://127.0.0.1:9000"

[search]
min_context_score  = 1.0
min_semantic_score = 2.0

[indexing]
workers     = 4
queue_depth = 64
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/tome/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
}

/// `[engine]` section — where the full-text engine lives and how long each
/// call may take.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_base_url")]
    pub base_url: String,
    #[serde(default = "default_engine_index")]
    pub index: String,
    #[serde(default = "default_engine_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_engine_base_url() -> String { "http://127.0.0.1:9200".to_string() }
fn default_engine_index() -> String { "books".to_string() }
fn default_engine_timeout_secs() -> u64 { 10 }

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_engine_base_url(),
            index: default_engine_index(),
            timeout_secs: default_engine_timeout_secs(),
        }
    }
}

/// `[storage]` section — the byte-store collaborator serving uploaded PDFs.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_base_url")]
    pub base_url: String,
}

fn default_storage_base_url() -> String { "http://127.0.0.1:9000".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: default_storage_base_url(),
        }
    }
}

/// `[search]` section — per-mode minimum relevance scores. Hits strictly
/// below the mode's threshold are discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_context_score")]
    pub min_context_score: f32,
    #[serde(default = "default_min_semantic_score")]
    pub min_semantic_score: f32,
}

fn default_min_context_score() -> f32 { 1.0 }
fn default_min_semantic_score() -> f32 { 2.0 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_context_score: default_min_context_score(),
            min_semantic_score: default_min_semantic_score(),
        }
    }
}

/// `[indexing]` section — extraction worker pool size and queue bound.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexingConfig {
    #[serde(default = "default_indexing_workers")]
    pub workers: usize,
    #[serde(default = "default_indexing_queue_depth")]
    pub queue_depth: usize,
}

fn default_indexing_workers() -> usize { 4 }
fn default_indexing_queue_depth() -> usize { 64 }

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            workers: default_indexing_workers(),
            queue_depth: default_indexing_queue_depth(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tome/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("tome")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
