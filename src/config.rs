//! Configuration loading from relmap.toml.
//!
//! The engine knobs (neighbor count, word-length cutoff, similarity floor)
//! live in a `[ranking]` table; output settings in `[output]`. CLI flags
//! override file values, which override the defaults.
//!
//! ## Example
//!
//! ```toml
//! [ranking]
//! neighbor-count = 10
//! word-length-cutoff = 3
//! similarity-floor = 0.00001
//!
//! [output]
//! directory = "out"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::RankingConfig;

/// relmap configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Engine knobs, defaults filled in for anything the file omits.
    pub ranking: RankingConfig,

    /// Output directory, if the file sets one.
    pub output_directory: Option<PathBuf>,
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    ranking: Option<RawRanking>,
    output: Option<RawOutput>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawRanking {
    neighbor_count: Option<usize>,
    word_length_cutoff: Option<usize>,
    similarity_floor: Option<f64>,
    progress_interval: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawOutput {
    directory: Option<String>,
}

impl Config {
    /// Load configuration for a catalog directory.
    ///
    /// Search order:
    /// 1. relmap.toml in the directory
    /// 2. relmap.toml in ancestor directories, nearest first
    /// 3. Default config if nothing found
    pub fn load(directory: &Path) -> Self {
        let mut current = Some(directory.to_path_buf());
        while let Some(dir) = current {
            let candidate = dir.join("relmap.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_file(&candidate) {
                    return config;
                }
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        Self::default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(Self::from_raw(raw, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        let mut ranking = RankingConfig::default();
        if let Some(r) = raw.ranking {
            if let Some(v) = r.neighbor_count {
                ranking.neighbor_count = v;
            }
            if let Some(v) = r.word_length_cutoff {
                ranking.word_length_cutoff = v;
            }
            if let Some(v) = r.similarity_floor {
                ranking.similarity_floor = v;
            }
            if let Some(v) = r.progress_interval {
                ranking.progress_interval = v;
            }
        }

        Self {
            source: Some(source),
            ranking,
            output_directory: raw
                .output
                .and_then(|o| o.directory)
                .map(PathBuf::from),
        }
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref source) = self.source {
            lines.push(format!("   Config: {}", source.display()));
        } else {
            lines.push("   Config: (defaults)".to_string());
        }

        lines.push(format!(
            "   Ranking: k={}, cutoff={}, floor={}",
            self.ranking.neighbor_count,
            self.ranking.word_length_cutoff,
            self.ranking.similarity_floor
        ));

        if let Some(ref dir) = self.output_directory {
            lines.push(format!("   Output: {}", dir.display()));
        }

        lines.join("\n")
    }
}
