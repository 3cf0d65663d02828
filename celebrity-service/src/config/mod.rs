use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Instruction sent alongside every uploaded image.
pub const DEFAULT_PROMPT: &str = "Identify the celebrities in this image. Just return the name.";

/// MIME type attached to the inline image when nothing better is known.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Default upload cap (20MB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct CelebrityConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub analyze: AnalyzeConfig,
}

#[derive(Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GoogleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeConfig {
    pub prompt: String,
    pub mime_strategy: MimeStrategy,
    pub max_upload_bytes: usize,
}

/// How the inline image part gets its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum MimeStrategy {
    /// Always send this type, whatever was uploaded.
    Fixed(String),
    /// Trust the part's `Content-Type` when it names an image.
    FromUpload,
}

impl Default for MimeStrategy {
    fn default() -> Self {
        MimeStrategy::Fixed(DEFAULT_MIME_TYPE.to_string())
    }
}

impl MimeStrategy {
    /// Pick the MIME type for an upload that declared `declared`.
    ///
    /// Parameters such as `; name=a` are dropped; only `type/subtype` is kept.
    pub fn resolve(&self, declared: Option<&str>) -> String {
        match self {
            MimeStrategy::Fixed(mime) => mime.clone(),
            MimeStrategy::FromUpload => declared
                .and_then(|m| m.split(';').next())
                .map(str::trim)
                .filter(|m| m.starts_with("image/") && m.len() > "image/".len())
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string(),
        }
    }
}

impl CelebrityConfig {
    /// Load from `.env`, the `configuration` file and the process environment.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_source(common, |key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_source<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: Option<&str>| get_var(&lookup, key, default);

        let api_key = get("GEMINI_API_KEY", None)?;
        if api_key.trim().is_empty() {
            return Err(config_error("GEMINI_API_KEY is set but empty"));
        }

        let mime_strategy = match get("ANALYZE_MIME_STRATEGY", Some("fixed"))?
            .to_ascii_lowercase()
            .as_str()
        {
            "fixed" => {
                MimeStrategy::Fixed(get("ANALYZE_FIXED_MIME_TYPE", Some(DEFAULT_MIME_TYPE))?)
            }
            "upload" => MimeStrategy::FromUpload,
            other => {
                return Err(config_error(&format!(
                    "ANALYZE_MIME_STRATEGY must be 'fixed' or 'upload', got '{}'",
                    other
                )));
            }
        };

        Ok(CelebrityConfig {
            common,
            google: GoogleConfig {
                api_key,
                model: get("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                api_base: get("GEMINI_API_BASE", Some(DEFAULT_API_BASE))?
                    .trim_end_matches('/')
                    .to_string(),
                timeout_seconds: parse_var(
                    "GEMINI_TIMEOUT_SECONDS",
                    get(
                        "GEMINI_TIMEOUT_SECONDS",
                        Some(DEFAULT_TIMEOUT_SECONDS.to_string().as_str()),
                    )?,
                )?,
            },
            analyze: AnalyzeConfig {
                prompt: get("ANALYZE_PROMPT", Some(DEFAULT_PROMPT))?,
                mime_strategy,
                max_upload_bytes: parse_var(
                    "ANALYZE_MAX_UPLOAD_BYTES",
                    get(
                        "ANALYZE_MAX_UPLOAD_BYTES",
                        Some(DEFAULT_MAX_UPLOAD_BYTES.to_string().as_str()),
                    )?,
                )?,
            },
        })
    }
}

fn get_var<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match (lookup(key), default) {
        (Some(val), _) => Ok(val),
        (None, Some(def)) => Ok(def.to_string()),
        (None, None) => Err(config_error(&format!("{} is required but not set", key))),
    }
}

fn parse_var<T>(key: &str, raw: String) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| config_error(&format!("{} has invalid value '{}': {}", key, raw, e)))
}

fn config_error(msg: &str) -> AppError {
    AppError::ConfigError(anyhow::anyhow!("{}", msg))
}
