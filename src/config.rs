//! Build configuration.
//!
//! Every path the generator touches comes from a [`BuildConfig`]. The stock
//! defaults reproduce the conventional layout:
//!
//! ```text
//! .
//! ├── sitegen.toml      # optional, overrides the defaults below
//! ├── template.html     # page template with {{ Title }} and {{ Content }}
//! ├── content/          # markdown tree → docs/**/*.html
//! ├── static/           # asset tree   → docs/** (copied verbatim)
//! └── docs/             # destination root (or <base_path>/docs)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "content"
//! static_dir = "static"
//! template = "template.html"
//! output_dir = "docs"
//! # base_path = "site"      # destination becomes site/docs
//!
//! [markdown]
//! tables = true
//! strikethrough = true
//! footnotes = false
//! tasklists = false
//! smart_punctuation = false
//!
//! [build]
//! parallel = false
//! # max_threads = 4
//! ```
//!
//! User values are merged over the stock defaults, so a config file only
//! needs the keys it changes. Unknown keys are rejected to catch typos early.
//! Command-line flags are applied last through [`Overrides`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "sitegen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything a build needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root of the markdown source tree.
    pub content_dir: PathBuf,
    /// Root of the static asset tree.
    pub static_dir: PathBuf,
    /// Page template file.
    pub template: PathBuf,
    /// Destination directory name, relative to `base_path` when one is set.
    pub output_dir: PathBuf,
    /// Optional prefix for the destination root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,
    /// Build execution settings.
    pub build: BuildOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("docs"),
            base_path: None,
            markdown: MarkdownConfig::default(),
            build: BuildOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Directory that receives generated pages and copied assets.
    ///
    /// `<base_path>/<output_dir>` when a base path is set, `<output_dir>`
    /// otherwise.
    pub fn destination_root(&self) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(&self.output_dir),
            None => self.output_dir.clone(),
        }
    }

    /// Validate that every path is set and thread limits make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("content_dir", &self.content_dir),
            ("static_dir", &self.static_dir),
            ("template", &self.template),
            ("output_dir", &self.output_dir),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.build.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            content_dir,
            static_dir,
            template,
            output_dir,
            base_path,
        } = overrides;
        if let Some(dir) = content_dir {
            self.content_dir = dir;
        }
        if let Some(dir) = static_dir {
            self.static_dir = dir;
        }
        if let Some(path) = template {
            self.template = path;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if base_path.is_some() {
            self.base_path = base_path;
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub content_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_path: Option<PathBuf>,
}

/// Markdown extensions passed to the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: false,
            tasklists: false,
            smart_punctuation: false,
        }
    }
}

/// Build execution settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Generate sibling entries of a directory on the rayon pool.
    pub parallel: bool,
    /// Maximum worker threads for parallel builds.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(options: &BuildOptions) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    options.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the build configuration.
///
/// With `Some(path)` the file must exist. With `None`, [`DEFAULT_CONFIG_FILE`]
/// is used when present and the stock defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<BuildConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let raw = load_raw_config(path)?;
            if raw.is_none() {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            raw
        }
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `sitegen.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitegen configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Command-line flags (--content, --static-dir, --template, --output and the
# BASE_PATH argument) take precedence over this file.

# Directory holding the markdown sources. Every `*.md` file becomes a page.
content_dir = "content"

# Directory copied verbatim into the destination after pages are generated.
# Assets win over generated pages with the same path.
static_dir = "static"

# Page template. `{{ Title }}` and `{{ Content }}` are replaced in every page.
template = "template.html"

# Destination directory.
output_dir = "docs"

# Optional prefix for the destination: with base_path = "site" pages are
# written to site/docs.
# base_path = "site"

# ---------------------------------------------------------------------------
# Markdown extensions
# ---------------------------------------------------------------------------
[markdown]
tables = true
strikethrough = true
footnotes = false
tasklists = false
smart_punctuation = false

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Generate the pages of each directory in parallel.
parallel = false

# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_conventional_layout() {
        let config = BuildConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.template, PathBuf::from("template.html"));
        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert_eq!(config.base_path, None);
        assert!(!config.build.parallel);
    }

    #[test]
    fn destination_without_base_path() {
        assert_eq!(
            BuildConfig::default().destination_root(),
            PathBuf::from("docs")
        );
    }

    #[test]
    fn destination_with_base_path() {
        let config = BuildConfig {
            base_path: Some(PathBuf::from("site")),
            ..BuildConfig::default()
        };
        assert_eq!(config.destination_root(), PathBuf::from("site/docs"));
    }

    #[test]
    fn parse_partial_config() {
        let config: BuildConfig = toml::from_str(
            r#"
content_dir = "pages"

[markdown]
footnotes = true
"#,
        )
        .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("pages"));
        assert!(config.markdown.footnotes);
        // Defaults preserved
        assert!(config.markdown.tables);
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_missing_optional_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let overlay = load_raw_config(&tmp.path().join("sitegen.toml")).unwrap();
        assert!(overlay.is_none());
        assert_eq!(resolve_config(overlay).unwrap(), BuildConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitegen.toml");
        fs::write(
            &path,
            r#"
base_path = "public"
template = "layout.html"

[build]
parallel = true
max_threads = 2
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.base_path, Some(PathBuf::from("public")));
        assert_eq!(config.template, PathBuf::from("layout.html"));
        assert!(config.build.parallel);
        assert_eq!(config.build.max_threads, Some(2));
        assert_eq!(config.destination_root(), PathBuf::from("public/docs"));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitegen.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let value: toml::Value = toml::from_str("contnet_dir = \"x\"").unwrap();
        assert!(matches!(resolve_config(Some(value)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let value: toml::Value = toml::from_str("[markdown]\nmath = true").unwrap();
        assert!(resolve_config(Some(value)).is_err());
    }

    #[test]
    fn empty_path_rejected() {
        let value: toml::Value = toml::from_str("output_dir = \"\"").unwrap();
        let err = resolve_config(Some(value)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("output_dir"));
    }

    #[test]
    fn zero_threads_rejected() {
        let value: toml::Value = toml::from_str("[build]\nmax_threads = 0").unwrap();
        assert!(matches!(
            resolve_config(Some(value)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(BuildConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[test]
    fn overrides_replace_set_values_only() {
        let mut config = BuildConfig {
            template: PathBuf::from("from-file.html"),
            ..BuildConfig::default()
        };
        config.apply(Overrides {
            content_dir: Some(PathBuf::from("src-md")),
            base_path: Some(PathBuf::from("out")),
            ..Overrides::default()
        });
        assert_eq!(config.content_dir, PathBuf::from("src-md"));
        assert_eq!(config.template, PathBuf::from("from-file.html"));
        assert_eq!(config.destination_root(), PathBuf::from("out/docs"));
    }

    #[test]
    fn absent_base_path_override_keeps_configured_one() {
        let mut config = BuildConfig {
            base_path: Some(PathBuf::from("public")),
            ..BuildConfig::default()
        };
        config.apply(Overrides::default());
        assert_eq!(config.base_path, Some(PathBuf::from("public")));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 5\nz = 6").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(5));
        assert_eq!(merged["t"]["z"].as_integer(), Some(6));
    }

    // =========================================================================
    // Threads
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&BuildOptions::default()), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let options = BuildOptions {
            parallel: true,
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&options), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let options = BuildOptions {
            parallel: true,
            max_threads: Some(cores + 64),
        };
        assert_eq!(effective_threads(&options), cores);
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: BuildConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value();
        assert!(value.is_table());
        assert!(value.get("markdown").is_some());
        assert!(value.get("base_path").is_none());
    }
}
