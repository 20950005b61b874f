//! Configuration loading, validation, and management for RestFeed.
//!
//! Loads configuration from `~/.restfeed/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use restfeed_core::content::{ContentType, DEFAULT_CONTENT_TYPE, TAG_TAXONOMY};
use restfeed_core::schema::SpecVersion;
use restfeed_core::site::SiteSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.restfeed/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site identity and feed-wide settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Feed endpoint settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Content source configuration
    #[serde(default)]
    pub content: ContentConfig,

    /// Registered content types
    #[serde(default = "default_content_types")]
    pub content_types: Vec<ContentTypeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Tagline
    #[serde(default)]
    pub description: String,

    #[serde(default = "default_base_url")]
    pub home_url: String,

    /// Root URL that feed routes are served under
    #[serde(default = "default_base_url")]
    pub rest_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Site icon; `{size}` is replaced by the pixel size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub admin_email: String,

    /// Emit excerpts as `content_text` instead of `content_html`
    #[serde(default)]
    pub use_excerpt: bool,

    #[serde(default = "default_posts_per_feed")]
    pub posts_per_feed: u64,

    /// Derive Gravatar avatars from user emails
    #[serde(default = "default_true")]
    pub avatars: bool,
}

fn default_site_name() -> String {
    "My Site".into()
}
fn default_base_url() -> String {
    "http://127.0.0.1:8080/".into()
}
fn default_language() -> String {
    "en-US".into()
}
fn default_posts_per_feed() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            description: String::new(),
            home_url: default_base_url(),
            rest_url: default_base_url(),
            language: default_language(),
            icon_url: None,
            admin_email: String::new(),
            use_excerpt: false,
            posts_per_feed: default_posts_per_feed(),
            avatars: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// "1" or "1.1"
    #[serde(default = "default_spec_version")]
    pub spec_version: String,

    /// Stop emitting the deprecated v1 `author` next to `authors`
    #[serde(default)]
    pub skip_backward_compatibility: bool,
}

fn default_namespace() -> String {
    "feed/v1".into()
}
fn default_spec_version() -> String {
    "1.1".into()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            spec_version: default_spec_version(),
            skip_backward_compatibility: false,
        }
    }
}

impl FeedConfig {
    /// The configured JSON Feed version, if valid.
    pub fn spec_version(&self) -> Option<SpecVersion> {
        SpecVersion::parse(&self.spec_version)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON-lines content export; unset = empty in-memory store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A content type as declared by the host. Unset feed fields take the
/// registration-time defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub name: String,

    /// Plural label; defaults to the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_feed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_base: Option<String>,

    #[serde(default)]
    pub supports_thumbnail: bool,

    #[serde(default)]
    pub supports_author: bool,

    #[serde(default)]
    pub taxonomies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_url: Option<String>,
}

fn default_content_types() -> Vec<ContentTypeConfig> {
    vec![
        ContentTypeConfig {
            name: "post".into(),
            label: Some("Posts".into()),
            description: String::new(),
            show_feed: None,
            feed_base: None,
            supports_thumbnail: true,
            supports_author: true,
            taxonomies: vec!["category".into(), TAG_TAXONOMY.into()],
            archive_url: None,
        },
        ContentTypeConfig {
            name: "page".into(),
            label: Some("Pages".into()),
            description: String::new(),
            show_feed: None,
            feed_base: None,
            supports_thumbnail: true,
            supports_author: true,
            taxonomies: vec![],
            archive_url: None,
        },
    ]
}

impl ContentTypeConfig {
    /// Convert into a domain content type, applying registration defaults:
    /// only the default type gets a feed and the `posts` base unless set.
    pub fn to_content_type(&self) -> ContentType {
        let is_default = self.name == DEFAULT_CONTENT_TYPE;
        ContentType {
            name: self.name.clone(),
            label: self.label.clone().unwrap_or_else(|| self.name.clone()),
            description: self.description.clone(),
            show_feed: self.show_feed.unwrap_or(is_default),
            feed_base: self
                .feed_base
                .clone()
                .unwrap_or_else(|| if is_default { "posts".into() } else { String::new() }),
            supports_thumbnail: self.supports_thumbnail,
            supports_author: self.supports_author,
            taxonomies: self.taxonomies.clone(),
            archive_url: self.archive_url.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.restfeed/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `RESTFEED_SITE_NAME`
    /// - `RESTFEED_REST_URL`
    /// - `RESTFEED_CONTENT_PATH`
    /// - `RESTFEED_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load `path`, then apply environment overrides and validate.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `RESTFEED_*` overrides read through `var`.
    pub fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(name) = var("RESTFEED_SITE_NAME") {
            self.site.name = name;
        }
        if let Some(rest_url) = var("RESTFEED_REST_URL") {
            self.site.rest_url = rest_url;
        }
        if let Some(path) = var("RESTFEED_CONTENT_PATH") {
            self.content.path = Some(path);
        }
        if let Some(port) = var("RESTFEED_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("RESTFEED_PORT is not a valid port: {port}"))
            })?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".restfeed")
    }

    /// Default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("site.home_url", &self.site.home_url),
            ("site.rest_url", &self.site.rest_url),
        ] {
            let parsed = url::Url::parse(value).map_err(|e| {
                ConfigError::ValidationError(format!("{field} is not a valid URL ({value}): {e}"))
            })?;
            if parsed.cannot_be_a_base() {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must be an absolute URL: {value}"
                )));
            }
        }

        if self.site.posts_per_feed == 0 {
            return Err(ConfigError::ValidationError(
                "site.posts_per_feed must be at least 1".into(),
            ));
        }

        if self.feed.namespace.trim_matches('/').is_empty() {
            return Err(ConfigError::ValidationError(
                "feed.namespace must not be empty".into(),
            ));
        }
        check_route_segments("feed.namespace", &self.feed.namespace)?;

        if self.feed.spec_version().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "feed.spec_version must be \"1\" or \"1.1\", got \"{}\"",
                self.feed.spec_version
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for ct in &self.content_types {
            if ct.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "content type names must not be empty".into(),
                ));
            }
            if !seen.insert(ct.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate content type: {}",
                    ct.name
                )));
            }
        }

        // Enabled feeds become routes; two types may not share one.
        let mut bases = std::collections::HashSet::new();
        for ct in self.content_types().into_iter().filter(|ct| ct.show_feed) {
            let base = if ct.feed_base.is_empty() {
                ct.name.clone()
            } else {
                ct.feed_base.clone()
            };
            let base = base.trim_matches('/').to_string();
            check_route_segments(&format!("feed base of {}", ct.name), &base)?;
            if !bases.insert(base.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "feed base {base} is used by more than one content type"
                )));
            }
        }

        Ok(())
    }

    /// Site settings for feed assembly.
    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            name: self.site.name.clone(),
            description: self.site.description.clone(),
            home_url: self.site.home_url.clone(),
            rest_url: self.site.rest_url.clone(),
            language: self.site.language.clone(),
            icon_url: self.site.icon_url.clone(),
            admin_email: self.site.admin_email.clone(),
            use_excerpt: self.site.use_excerpt,
            posts_per_feed: self.site.posts_per_feed,
            avatars: self.site.avatars,
        }
    }

    /// All registered content types with defaults applied.
    pub fn content_types(&self) -> Vec<ContentType> {
        self.content_types
            .iter()
            .map(ContentTypeConfig::to_content_type)
            .collect()
    }

    /// The configured JSON Feed version, falling back to 1.1.
    pub fn spec_version(&self) -> SpecVersion {
        self.feed.spec_version().unwrap_or_default()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            feed: FeedConfig::default(),
            gateway: GatewayConfig::default(),
            content: ContentConfig::default(),
            content_types: default_content_types(),
        }
    }
}

/// Reject values that the router would read as path syntax.
fn check_route_segments(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim_matches('/');
    if trimmed.contains(['{', '}', '*']) {
        return Err(ConfigError::ValidationError(format!(
            "{field} contains a reserved character: {value}"
        )));
    }
    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{field} contains an empty path segment: {value}"
            )));
        }
        if segment.starts_with(':') {
            return Err(ConfigError::ValidationError(format!(
                "{field} has a segment starting with ':': {value}"
            )));
        }
    }
    Ok(())
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feed.namespace, "feed/v1");
        assert_eq!(config.spec_version(), SpecVersion::V1_1);
        assert_eq!(config.site.posts_per_feed, 10);
        assert!(!config.feed.skip_backward_compatibility);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.feed.namespace, config.feed.namespace);
        assert_eq!(parsed.gateway.port, config.gateway.port);
        assert_eq!(parsed.content_types.len(), 2);
    }

    #[test]
    fn registration_defaults_only_enable_post() {
        let types = AppConfig::default().content_types();
        let post = types.iter().find(|t| t.name == "post").unwrap();
        let page = types.iter().find(|t| t.name == "page").unwrap();
        assert!(post.show_feed);
        assert_eq!(post.feed_base, "posts");
        assert!(!page.show_feed);
        assert_eq!(page.feed_base, "");
    }

    #[test]
    fn explicit_feed_settings_are_kept() {
        let ct = ContentTypeConfig {
            name: "content".into(),
            label: None,
            description: String::new(),
            show_feed: Some(true),
            feed_base: Some("content".into()),
            supports_thumbnail: false,
            supports_author: false,
            taxonomies: vec![],
            archive_url: None,
        }
        .to_content_type();
        assert!(ct.show_feed);
        assert_eq!(ct.feed_base, "content");
        assert_eq!(ct.label, "content");
    }

    #[test]
    fn invalid_rest_url_rejected() {
        let mut config = AppConfig::default();
        config.site.rest_url = "not a url".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut config = AppConfig::default();
        config.site.posts_per_feed = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_spec_version_rejected() {
        let mut config = AppConfig::default();
        config.feed.spec_version = "2.0".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn shared_feed_base_rejected() {
        let mut config = AppConfig::default();
        config.content_types[1].show_feed = Some(true);
        config.content_types[1].feed_base = Some("/posts/".into());
        assert!(config.validate().is_err());

        config.content_types[1].feed_base = Some("pages".into());
        assert!(config.validate().is_ok());

        config.content_types[1].feed_base = Some("{id}".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn route_syntax_in_feed_base_rejected() {
        for base in [":recipes", "food/:kind", "food//recipes", "{id}", "food/*rest"] {
            let mut config = AppConfig::default();
            config.content_types[1].show_feed = Some(true);
            config.content_types[1].feed_base = Some(base.into());
            assert!(
                matches!(config.validate(), Err(ConfigError::ValidationError(_))),
                "base {base} should be rejected"
            );
        }
    }

    #[test]
    fn route_syntax_in_namespace_rejected() {
        for namespace in [":feed/v1", "feed/:version", "feed//v1", "feed/{v}", "feed/*"] {
            let mut config = AppConfig::default();
            config.feed.namespace = namespace.into();
            assert!(
                matches!(config.validate(), Err(ConfigError::ValidationError(_))),
                "namespace {namespace} should be rejected"
            );
        }

        let mut config = AppConfig::default();
        config.feed.namespace = "/custom/v2/".into();
        assert!(config.validate().is_ok());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_configured_values() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(vars(&[
                ("RESTFEED_SITE_NAME", "Override Blog"),
                ("RESTFEED_REST_URL", "https://feeds.example.org/api/"),
                ("RESTFEED_CONTENT_PATH", "/srv/content.jsonl"),
                ("RESTFEED_PORT", "9191"),
            ]))
            .unwrap();

        assert_eq!(config.site.name, "Override Blog");
        assert_eq!(config.site.rest_url, "https://feeds.example.org/api/");
        assert_eq!(config.content.path.as_deref(), Some("/srv/content.jsonl"));
        assert_eq!(config.gateway.port, 9191);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unset_overrides_keep_file_values() {
        let mut config = AppConfig::default();
        let before_port = config.gateway.port;
        config
            .apply_overrides(vars(&[("RESTFEED_SITE_NAME", "Only Name")]))
            .unwrap();

        assert_eq!(config.site.name, "Only Name");
        assert_eq!(config.site.rest_url, AppConfig::default().site.rest_url);
        assert_eq!(config.content.path, None);
        assert_eq!(config.gateway.port, before_port);
    }

    #[test]
    fn invalid_port_override_rejected() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.apply_overrides(vars(&[("RESTFEED_PORT", "abc")])),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            config.apply_overrides(vars(&[("RESTFEED_PORT", "70000")])),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn duplicate_content_type_rejected() {
        let mut config = AppConfig::default();
        config.content_types.push(config.content_types[0].clone());
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        let config = result.unwrap();
        assert_eq!(config.feed.namespace, "feed/v1");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[site]
name = "Example Blog"
rest_url = "https://example.com/wp-json/"
posts_per_feed = 3
use_excerpt = true

[feed]
spec_version = "1"

[[content_types]]
name = "post"

[[content_types]]
name = "recipe"
label = "Recipes"
show_feed = true
feed_base = "custom/recipes"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.site.name, "Example Blog");
        assert_eq!(config.site.posts_per_feed, 3);
        assert!(config.site.use_excerpt);
        assert_eq!(config.spec_version(), SpecVersion::V1);

        let types = config.content_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].feed_base, "posts");
        assert_eq!(types[1].feed_base, "custom/recipes");
        assert_eq!(types[1].label, "Recipes");
    }

    #[test]
    fn unparseable_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[site\nname = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("feed/v1"));
        assert!(toml_str.contains("8080"));
    }
}
