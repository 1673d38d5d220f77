//! The two chains served over HTTP.

mod agent;
mod rag;

pub use agent::{agent_with_retrievers, basic_agent};
pub use rag::{RagChain, basic_rag_chain};
