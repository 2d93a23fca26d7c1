//! Configuration file (versegen.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use versegen_source::SourceConfig;
use versegen_static::BuildConfig;

/// Environment variable that overrides `site.origin`.
pub const ORIGIN_ENV: &str = "SITE_ORIGIN";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_logo_url")]
    pub logo_url: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SourceSettings {
    #[serde(default = "default_local")]
    pub local: Option<String>,
    #[serde(default = "default_remote")]
    pub remote: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            base_path: default_base_path(),
            brand: default_brand(),
            title: default_title(),
            logo_url: default_logo_url(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            local: default_local(),
            remote: default_remote(),
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            attempts: default_attempts(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: default_minify(),
        }
    }
}

fn default_origin() -> String {
    "https://asv.the-holy-bible.livingwordbibles.com".to_string()
}
fn default_base_path() -> String {
    "/asv".to_string()
}
fn default_brand() -> String {
    "Living Word Bibles".to_string()
}
fn default_title() -> String {
    "The Holy Bible: American Standard Version".to_string()
}
fn default_logo_url() -> String {
    "https://static1.squarespace.com/static/68d6b7d6d21f02432fd7397b/t/690209b3567af44aabfbdaca/1761741235124/LivingWordBibles01.png".to_string()
}
fn default_local() -> Option<String> {
    Some("ASV/ASV_bible.json".to_string())
}
fn default_remote() -> Vec<String> {
    const REV: &str = "86d528c69b5bbcca9ce0dc0b17b037c1128c6651";
    vec![
        format!("https://cdn.jsdelivr.net/gh/jadenzaleski/bible-translations@{REV}/ASV/ASV_bible.json"),
        format!("https://raw.githubusercontent.com/jadenzaleski/bible-translations/{REV}/ASV/ASV_bible.json"),
        format!("https://cdn.statically.io/gh/jadenzaleski/bible-translations/{REV}/ASV/ASV_bible.json"),
    ]
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_retry_delay_ms() -> u64 {
    500
}
fn default_attempts() -> u32 {
    1
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Replace `site.origin` with `origin` when it is set and non-empty.
    pub fn with_origin_override(mut self, origin: Option<String>) -> Self {
        if let Some(origin) = origin.filter(|o| !o.trim().is_empty()) {
            self.site.origin = origin;
        }
        self
    }

    /// Loader settings.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            local: self.source.local.as_ref().map(PathBuf::from),
            remote: self.source.remote.clone(),
            timeout: Duration::from_secs(self.source.timeout_secs),
            retry_delay: Duration::from_millis(self.source.retry_delay_ms),
            attempts: self.source.attempts,
        }
    }

    /// Builder settings, with CLI overrides applied.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.build.output)),
            origin: self.site.origin.clone(),
            base_path: self.site.base_path.clone(),
            title: self.site.title.clone(),
            brand: self.site.brand.clone(),
            logo_url: self.site.logo_url.clone(),
            minify: minify.unwrap_or(self.build.minify),
        }
    }
}

/// Load configuration from `path` if it exists, then apply `SITE_ORIGIN`.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let config = read_config(path)?;
    Ok(config.with_origin_override(std::env::var(ORIGIN_ENV).ok()))
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Contents written by `versegen init`.
pub const DEFAULT_CONFIG: &str = r#"# versegen configuration

[site]
# Absolute origin used for canonical links, the sitemap, and robots.txt.
# The SITE_ORIGIN environment variable takes precedence.
origin = "https://asv.the-holy-bible.livingwordbibles.com"

# Path all verse pages live under
base_path = "/asv"

brand = "Living Word Bibles"
title = "The Holy Bible: American Standard Version"
logo_url = "https://static1.squarespace.com/static/68d6b7d6d21f02432fd7397b/t/690209b3567af44aabfbdaca/1761741235124/LivingWordBibles01.png"

[source]
# Local cache, used when present and valid JSON
local = "ASV/ASV_bible.json"

# Mirrors, tried in order
remote = [
  "https://cdn.jsdelivr.net/gh/jadenzaleski/bible-translations@86d528c69b5bbcca9ce0dc0b17b037c1128c6651/ASV/ASV_bible.json",
  "https://raw.githubusercontent.com/jadenzaleski/bible-translations/86d528c69b5bbcca9ce0dc0b17b037c1128c6651/ASV/ASV_bible.json",
  "https://cdn.statically.io/gh/jadenzaleski/bible-translations/86d528c69b5bbcca9ce0dc0b17b037c1128c6651/ASV/ASV_bible.json",
]

timeout_secs = 20
retry_delay_ms = 500

# Requests per mirror
attempts = 1

[build]
output = "dist"
minify = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_builtin_defaults() {
        let parsed: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(parsed, ConfigFile::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = read_config(&temp.path().join("versegen.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.site.base_path, "/asv");
        assert_eq!(config.source.remote.len(), 3);
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("versegen.toml");
        fs::write(&path, "[site]\ntitle = \"KJV\"\n\n[source]\nattempts = 3\n").unwrap();

        let config = read_config(&path).unwrap();

        assert_eq!(config.site.title, "KJV");
        assert_eq!(config.site.brand, "Living Word Bibles");
        assert_eq!(config.source.attempts, 3);
        assert_eq!(config.source.timeout_secs, 20);
        assert_eq!(config.build, BuildSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("versegen.toml");
        fs::write(&path, "[site\norigin = ").unwrap();

        let err = read_config(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn origin_override() {
        let config = ConfigFile::default().with_origin_override(Some("https://bible.test".to_string()));
        assert_eq!(config.site.origin, "https://bible.test");

        let config = ConfigFile::default().with_origin_override(Some("  ".to_string()));
        assert_eq!(config.site.origin, default_origin());
    }

    #[test]
    fn cli_flags_override_build_settings() {
        let config = ConfigFile::default();

        let build = config.build_config(Some(PathBuf::from("public")), Some(false));
        assert_eq!(build.output_dir, PathBuf::from("public"));
        assert!(!build.minify);

        let build = config.build_config(None, None);
        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert!(build.minify);
        assert_eq!(build.base_path, "/asv");
    }

    #[test]
    fn source_settings_convert_units() {
        let source = ConfigFile::default().source_config();

        assert_eq!(source.local, Some(PathBuf::from("ASV/ASV_bible.json")));
        assert_eq!(source.timeout, Duration::from_secs(20));
        assert_eq!(source.retry_delay, Duration::from_millis(500));
        assert_eq!(source.attempts, 1);
    }
}
