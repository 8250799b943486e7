mod ollama;
mod provider;

pub use ollama::{OllamaConfig, OllamaEncoder};
pub use provider::TextEncoder;

#[cfg(test)]
pub use provider::MockTextEncoder;
