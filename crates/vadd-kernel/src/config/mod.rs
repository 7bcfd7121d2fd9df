//! Layered configuration loading
//!
//! Configuration is assembled from up to two sources, later ones winning:
//!
//! 1. An optional file (YAML, TOML or JSON, detected from the extension) with
//!    `${VAR}` / `$VAR` environment substitution applied to its text.
//! 2. Environment variables carrying a prefix, with `__` separating nested
//!    keys: `VADD_SERVER__PORT=9000` sets `server.port`.
//!
//! Target types are expected to carry `#[serde(default)]` so that an empty
//! configuration deserializes to the defaults.

use config::{Config as Cfg, Environment, File, FileFormat};
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::LazyLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

static BRACED_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("braced variable pattern is valid")
});

static BARE_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)\b").expect("bare variable pattern is valid")
});

/// Detect the configuration format from a file extension.
///
/// Accepts `.yaml`/`.yml`, `.toml` and `.json`.
pub fn detect_format(path: &Path) -> ConfigResult<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConfigError::UnsupportedFormat(format!("{}: no extension", path.display())))?;

    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Replace `${VAR}` and `$VAR` references with their environment values.
///
/// Unset variables are left verbatim so the parse error points at them.
pub fn substitute_env_vars(content: &str) -> String {
    let lookup = |caps: &Captures| std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string());
    let braced = BRACED_VAR.replace_all(content, lookup);
    BARE_VAR.replace_all(&braced, lookup).into_owned()
}

/// Parse configuration text in an explicit format.
pub fn from_str<T>(content: &str, format: FileFormat) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let substituted = substitute_env_vars(content);
    let config = Cfg::builder()
        .add_source(File::from_str(&substituted, format))
        .build()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Deserialize(e.to_string()))
}

/// Load configuration from an optional file plus prefixed environment
/// variables.
///
/// With `path == None` only the environment (and the target's serde
/// defaults) contribute.
pub fn load_layered<T>(path: Option<&Path>, env_prefix: &str) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let mut builder = Cfg::builder();

    if let Some(path) = path {
        let format = detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration file");
        builder = builder.add_source(File::from_str(&substitute_env_vars(&content), format));
    }

    builder = builder.add_source(
        Environment::with_prefix(env_prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Deserialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default)]
    struct Server {
        host: String,
        port: u16,
    }

    impl Default for Server {
        fn default() -> Self {
            Self {
                host: "0.0.0.0".to_string(),
                port: 8000,
            }
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Root {
        server: Server,
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("vadd.yaml")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("vadd.yml")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("vadd.TOML")).unwrap(), FileFormat::Toml);
        assert_eq!(detect_format(Path::new("vadd.json")).unwrap(), FileFormat::Json);
        assert!(detect_format(Path::new("vadd.txt")).is_err());
        assert!(detect_format(Path::new("vadd")).is_err());
    }

    #[test]
    fn test_substitute_env_vars() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("VADD_TEST_SUBST_HOST", "127.0.0.1") };
        let out = substitute_env_vars("host = \"${VADD_TEST_SUBST_HOST}\" # $VADD_TEST_SUBST_HOST");
        assert_eq!(out, "host = \"127.0.0.1\" # 127.0.0.1");
    }

    #[test]
    fn test_substitute_leaves_unset_vars() {
        let out = substitute_env_vars("path = \"${VADD_TEST_DEFINITELY_UNSET}\"");
        assert_eq!(out, "path = \"${VADD_TEST_DEFINITELY_UNSET}\"");
    }

    #[test]
    fn test_from_str_toml_partial_uses_defaults() {
        let root: Root = from_str("[server]\nport = 9000\n", FileFormat::Toml).unwrap();
        assert_eq!(root.server.port, 9000);
        assert_eq!(root.server.host, "0.0.0.0");
    }

    #[test]
    fn test_from_str_yaml() {
        let root: Root = from_str("server:\n  host: localhost\n", FileFormat::Yaml).unwrap();
        assert_eq!(root.server.host, "localhost");
        assert_eq!(root.server.port, 8000);
    }

    #[test]
    fn test_load_layered_without_file() {
        let root: Root = load_layered(None, "VADD_TEST_EMPTY").unwrap();
        assert_eq!(root, Root::default());
    }

    #[test]
    fn test_load_layered_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nhost = \"10.0.0.1\"\nport = 7000").unwrap();

        // SAFETY: the prefix is unique to this test.
        unsafe { std::env::set_var("VADD_TEST_LAYER_SERVER__PORT", "9100") };
        let root: Root = load_layered(Some(file.path()), "VADD_TEST_LAYER").unwrap();
        assert_eq!(root.server.host, "10.0.0.1");
        assert_eq!(root.server.port, 9100);
    }

    #[test]
    fn test_load_layered_missing_file() {
        let result: ConfigResult<Root> =
            load_layered(Some(Path::new("/nonexistent/vadd.toml")), "VADD_TEST_MISSING");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
