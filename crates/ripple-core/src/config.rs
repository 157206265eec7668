use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ripple.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RippleConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub pagerank: PageRankSettings,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Data directories. Relative paths resolve against the config file's
/// directory (or the working directory when no file exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_networks_dir")]
    pub networks: PathBuf,
    #[serde(default = "default_centralities_dir")]
    pub centralities: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results: PathBuf,
    #[serde(default = "default_plots_dir")]
    pub plots: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            networks: default_networks_dir(),
            centralities: default_centralities_dir(),
            results: default_results_dir(),
            plots: default_plots_dir(),
        }
    }
}

impl PathsConfig {
    /// Resolve every relative path against `base`.
    #[must_use]
    pub fn resolved(&self, base: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        Self {
            networks: resolve(&self.networks),
            centralities: resolve(&self.centralities),
            results: resolve(&self.results),
            plots: resolve(&self.plots),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Repetitions each experiment result is averaged over (caption text).
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    /// Initial thresholds of the first experiment, as written in directory names.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<String>,
    /// Game models, as written in result file names.
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Initial configurations of the first experiment.
    #[serde(default = "default_first_types")]
    pub first_types: Vec<String>,
    /// Agent configurations of the second experiment.
    #[serde(default = "default_second_types")]
    pub second_types: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            thresholds: default_thresholds(),
            models: default_models(),
            first_types: default_first_types(),
            second_types: default_second_types(),
        }
    }
}

/// A loaded configuration together with the directory its paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RippleConfig,
    pub base_dir: PathBuf,
    /// `None` when defaults were used because no file exists.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Data directories with relative entries resolved.
    #[must_use]
    pub fn paths(&self) -> PathsConfig {
        self.config.paths.resolved(&self.base_dir)
    }
}

/// Load `ripple.toml` from `dir`, falling back to defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(dir: &Path) -> Result<LoadedConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(LoadedConfig {
            config: RippleConfig::default(),
            base_dir: dir.to_path_buf(),
            source: None,
        });
    }
    load_config_file(&path)
}

/// Load an explicit config file. Its parent directory becomes the base
/// for relative paths.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RippleConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded config");

    let base_dir = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok(LoadedConfig {
        config,
        base_dir,
        source: Some(path.to_path_buf()),
    })
}

fn default_networks_dir() -> PathBuf {
    PathBuf::from("data/networks")
}

fn default_centralities_dir() -> PathBuf {
    PathBuf::from("data/centralities")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("data/results")
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("data/plots")
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

const fn default_repetitions() -> u32 {
    5
}

fn default_thresholds() -> Vec<String> {
    ["0.25", "0.50", "0.75", "0.95"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_models() -> Vec<String> {
    vec!["model-1".to_string(), "model-2".to_string()]
}

fn default_first_types() -> Vec<String> {
    vec!["complete".to_string(), "random".to_string()]
}

fn default_second_types() -> Vec<String> {
    vec!["cooperative".to_string(), "malicious".to_string()]
}
