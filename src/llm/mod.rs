//! LLM access: a provider-neutral completion trait, the Anthropic and OpenAI
//! backends, and JSON extraction from model responses.
//!
//! Callers that can work without a model hold an `Option<Arc<dyn LlmProvider>>`
//! and treat `None` as mock mode.

pub mod factory;
pub mod json;
pub mod provider;
pub mod providers;

pub use factory::{ProviderSettings, build_provider};
pub use json::{extract_json_lenient, extract_json_strict};
pub use provider::{CompletionRequest, LlmError, LlmProvider, ProviderKind};
pub use providers::{AnthropicProvider, OpenAiProvider};
