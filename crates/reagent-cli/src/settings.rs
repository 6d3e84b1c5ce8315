use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment, File};
use reagent::providers::configs::{
    OllamaProviderConfig, OpenAiProviderConfig, ProviderConfig, DEFAULT_TEMPERATURE, OLLAMA_HOST,
    OLLAMA_MODEL, OPENAI_HOST, OPENAI_MODEL,
};
use reagent::react::DEFAULT_MAX_TURNS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file looked up in the working directory, extension optional
pub const SETTINGS_FILE: &str = "reagent";

#[derive(Debug, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// A tera template replacing the built-in system prompt
    #[serde(default)]
    pub system_prompt_path: Option<PathBuf>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            system_prompt_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    OpenAi {
        #[serde(default = "default_openai_host")]
        host: String,
        api_key: String,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default)]
        max_tokens: Option<i32>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Ollama {
        #[serde(default = "default_ollama_host")]
        host: String,
        #[serde(default = "default_ollama_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default)]
        max_tokens: Option<i32>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl ProviderSettings {
    // Convert to the reagent ProviderConfig
    pub fn into_config(self) -> ProviderConfig {
        match self {
            ProviderSettings::OpenAi {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
                timeout_secs,
            } => ProviderConfig::OpenAi(OpenAiProviderConfig {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
                timeout: Duration::from_secs(timeout_secs),
            }),
            ProviderSettings::Ollama {
                host,
                model,
                temperature,
                max_tokens,
                timeout_secs,
            } => ProviderConfig::Ollama(OllamaProviderConfig {
                host,
                model,
                temperature,
                max_tokens,
                timeout: Duration::from_secs(timeout_secs),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub agent: AgentSettings,
}

impl Settings {
    /// Load from defaults, an optional `reagent.toml` and `REAGENT_*` variables
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Like [`Settings::new`] but reading the given settings file, which must exist
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let mut builder = Config::builder()
            .set_default("provider.type", "openai")?
            .set_default("agent.max_turns", default_max_turns() as i64)?;
        // The conventional OpenAI variable works when nothing more specific is set
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            builder = builder.set_default("provider.api_key", api_key)?;
        }

        let config = builder
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Try to deserialize the configuration
        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // Every field outside `provider` has a default
                let error_str = err.to_string();
                if let Some(start) = error_str.find("missing field `") {
                    let field = error_str[start..]
                        .trim_start_matches("missing field `")
                        .split('`')
                        .next()
                        .unwrap_or_default();
                    let env_var = to_env_var(&format!("provider.{}", field));
                    Err(ConfigError::MissingEnvVar { env_var })
                } else if let config::ConfigError::NotFound(field) = &err {
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_openai_host() -> String {
    OPENAI_HOST.to_string()
}

fn default_openai_model() -> String {
    OPENAI_MODEL.to_string()
}

fn default_ollama_host() -> String {
    OLLAMA_HOST.to_string()
}

fn default_ollama_model() -> String {
    OLLAMA_MODEL.to_string()
}
