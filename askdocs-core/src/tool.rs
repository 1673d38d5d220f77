//! The [`Tool`] trait implemented by anything an agent can call.

use async_trait::async_trait;
use serde_json::Value;

use crate::content::ToolDeclaration;
use crate::error::Result;

/// A callable tool exposed to an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, as the model will reference it.
    fn name(&self) -> &str;

    /// One-line description used by the model for tool selection.
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given JSON arguments.
    async fn execute(&self, args: Value) -> Result<Value>;

    /// The declaration advertised to the model.
    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}
