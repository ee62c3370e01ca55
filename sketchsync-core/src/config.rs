//! YAML configuration.
//!
//! # File layout
//!
//! ```text
//! suffix: .pde
//! compare_mode: shallow
//! archive_extension: zip
//! diff_tools: [/usr/local/bin/ksdiff, /usr/bin/opendiff]
//! pairs:
//!   - source: ../docs/content/examples/Basics
//!     target: ../website/content/examples/Basic Examples
//! package:
//!   source: ../docs/content/examples
//!   target: examples-pdez
//! ```
//!
//! Relative paths are resolved against the directory holding the config file;
//! a leading `~` expands to the home directory. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config_io_err, ConfigError};
use crate::types::{CompareMode, SuffixFilter};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "sketchsync.yaml";

/// Visual diff tools tried in order when none is configured.
pub const DEFAULT_DIFF_TOOLS: [&str; 2] = ["/usr/local/bin/ksdiff", "/usr/bin/opendiff"];

pub const DEFAULT_ARCHIVE_EXTENSION: &str = "zip";

/// A source tree and the mirror it is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreePair {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Where `package` reads sketches from and writes archives to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageTarget {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub suffix: SuffixFilter,
    pub compare_mode: CompareMode,
    pub archive_extension: String,
    pub diff_tools: Vec<PathBuf>,
    pub pairs: Vec<TreePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix: SuffixFilter::default(),
            compare_mode: CompareMode::default(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_owned(),
            diff_tools: DEFAULT_DIFF_TOOLS.into_iter().map(PathBuf::from).collect(),
            pairs: Vec::new(),
            package: None,
        }
    }
}

impl Config {
    /// Starter document written by `sketchsync init`: the examples checkout
    /// compared against the website mirror, and packaged into `examples-pdez`.
    pub fn template() -> Self {
        let examples = PathBuf::from("../processing-docs/content/examples");
        let website = PathBuf::from("../processing-website/content/examples");
        Self {
            archive_extension: "pdez".to_owned(),
            pairs: vec![
                TreePair {
                    source: examples.join("Basics"),
                    target: website.join("Basic Examples"),
                },
                TreePair {
                    source: examples.join("Topics"),
                    target: website.join("Topic Examples"),
                },
            ],
            package: Some(PackageTarget {
                source: examples,
                target: PathBuf::from("examples-pdez"),
            }),
            ..Self::default()
        }
    }

    /// Make every configured path absolute: expand `~`, then join relative
    /// paths onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) -> Result<(), ConfigError> {
        for pair in &mut self.pairs {
            pair.source = resolve(base, &pair.source)?;
            pair.target = resolve(base, &pair.target)?;
        }
        if let Some(package) = self.package.as_mut() {
            package.source = resolve(base, &package.source)?;
            package.target = resolve(base, &package.target)?;
        }
        for tool in &mut self.diff_tools {
            *tool = resolve(base, tool)?;
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().ok_or(ConfigError::HomeNotFound)?.join(rest),
        Err(_) => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load and resolve the config at `path`.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| config_io_err(path, e))?;
    // An empty document means "all defaults".
    let mut config: Config = if contents.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?
    };
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base)?;
    Ok(config)
}

/// Pick the config for a run started in `cwd`.
///
/// An explicit path must exist. Otherwise `<cwd>/sketchsync.yaml` is used when
/// present, falling back to [`Config::default`].
pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        return load_at(&path);
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    if candidate.exists() {
        load_at(&candidate)
    } else {
        Ok(Config::default())
    }
}

/// Write `config` to `path` atomically (`<path>.tmp` then rename).
pub fn save_at(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| config_io_err(dir, e))?;
    }
    let yaml = serde_yaml::to_string(config)?;
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(|e| config_io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(config_io_err(path, e));
    }
    Ok(())
}
