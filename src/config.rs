//! YAML application configuration.
//!
//! ```yaml
//! llm:
//!   provider: anthropic
//!   model: claude-sonnet-4-20250514
//!   timeout_secs: 60
//!   annotations: true
//! generation:
//!   presentation_type: investor_pitch
//!   max_slides: 12
//! output:
//!   path: decks/pitch.pptx
//!   template: main
//! ```
//!
//! Every key is optional. API keys left out of the file are read from
//! `ANTHROPIC_API_KEY` / `OPENAI_API_KEY` when the provider is built.
use crate::common::{Error, Result};
use crate::generation::GenerationOptions;
use crate::generation::prompts::DEFAULT_PRESENTATION_TYPE;
use crate::llm::{LlmProvider, ProviderKind, ProviderSettings, build_provider};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `anthropic`, `openai` or `mock`
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Settle chart annotation labels and positions before rendering
    pub annotations: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mock.as_str().to_string(),
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: 60,
            annotations: false,
        }
    }
}

impl LlmConfig {
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        Ok(self.provider.parse()?)
    }

    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
        }
    }

    /// The configured provider, or `None` in mock mode.
    pub fn build_provider(&self) -> Result<Option<Arc<dyn LlmProvider>>> {
        let kind = self.provider_kind()?;
        debug!("Building {} provider", kind);
        Ok(build_provider(kind, &self.settings())?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub presentation_type: String,
    pub max_slides: usize,
    pub audience: String,
    pub duration_minutes: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            presentation_type: DEFAULT_PRESENTATION_TYPE.to_string(),
            max_slides: 15,
            audience: "investors".to_string(),
            duration_minutes: 15,
        }
    }
}

impl GenerationConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            presentation_type: self.presentation_type.clone(),
            max_slides: self.max_slides,
            audience: self.audience.clone(),
            duration_minutes: self.duration_minutes,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "presentation.pptx".to_string(),
            template: "main".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Yaml(format!("Failed to parse configuration: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).map_err(|e| Error::Yaml(format!("Failed to serialize configuration: {}", e)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::NotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&yaml)
    }
}
