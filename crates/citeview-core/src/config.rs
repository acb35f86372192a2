use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How a rewritten citation marker is rendered into the answer text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MarkerStyle {
    /// `[docK]`, the same syntax the model emits.
    #[default]
    Doc,
    /// ` ^K^ `, markdown superscript (remark-supersub syntax).
    Superscript,
}

impl MarkerStyle {
    pub fn render(self, index: usize) -> String {
        match self {
            MarkerStyle::Doc => format!("[doc{index}]"),
            MarkerStyle::Superscript => format!(" ^{index}^ "),
        }
    }
}

impl TryFrom<String> for MarkerStyle {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl std::str::FromStr for MarkerStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doc" => Ok(MarkerStyle::Doc),
            "superscript" | "sup" => Ok(MarkerStyle::Superscript),
            other => Err(Error::InvalidConfig(format!("unknown marker style '{other}'"))),
        }
    }
}

/// Settings for citation labels and marker rendering (`[display]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// File paths longer than this many characters are middle-truncated.
    pub truncation_limit: usize,
    /// Characters kept at each end of a truncated path.
    pub keep_chars: usize,
    pub ellipsis: String,
    pub marker_style: MarkerStyle,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { truncation_limit: 50, keep_chars: 20, ellipsis: "...".to_string(), marker_style: MarkerStyle::Doc }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ellipsis.is_empty() {
            return Err(Error::InvalidConfig("display.ellipsis must not be empty".to_string()));
        }
        if self.keep_chars.saturating_mul(2) >= self.truncation_limit {
            return Err(Error::InvalidConfig(format!(
                "display.keep_chars ({}) must be less than half of display.truncation_limit ({})",
                self.keep_chars, self.truncation_limit
            )));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Merges `config.toml`, `config.<env>.toml` (env from `RUST_ENV`, default dev)
    /// and `CITEVIEW_*` variables on top of built-in defaults. Missing files are skipped.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Self::defaults().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("CITEVIEW_").split("__"));

        let config = Self { figment };
        config.display()?;
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Self { figment: Self::defaults().merge(Toml::string(toml)) };
        config.display()?;
        Ok(config)
    }

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::default("display", DisplayConfig::default()))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn display(&self) -> Result<DisplayConfig> {
        let display: DisplayConfig = self.get("display")?;
        display.validate()?;
        Ok(display)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
