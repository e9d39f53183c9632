pub mod openai_compat;
pub mod timeout;

pub use openai_compat::OpenAiCompatProvider;
pub use timeout::TimeoutLlm;

use trip_types::{Result, config::LlmConfig};

/// The default model stack: an OpenAI-compatible provider bounded by the
/// configured timeout.
pub fn connect(config: LlmConfig) -> Result<TimeoutLlm<OpenAiCompatProvider>> {
    let timeout_ms = config.timeout_ms;
    Ok(TimeoutLlm::new(OpenAiCompatProvider::new(config)?, timeout_ms))
}
