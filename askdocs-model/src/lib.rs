//! # askdocs-model
//!
//! LLM backends implementing [`askdocs_core::Llm`]:
//!
//! - [`OpenAIChatModel`] — chat completions over the OpenAI API with
//!   streaming and tool calling
//! - [`MockLlm`] — scripted responses for tests

pub mod mock;
pub mod openai;

pub use mock::MockLlm;
pub use openai::{OpenAIChatModel, OpenAIConfig};
