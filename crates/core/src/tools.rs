//! Agent Tool Surface
//!
//! This module exposes the home agent's two request operations as Model
//! Context Protocol tools, so an external voice host can mount them and let
//! its model do the routing. On this path the system prompt travels as the
//! server's `instructions` and the hosting model chooses which tool to call
//! per utterance.

use crate::agent_client::AgentBackend;
use crate::turn::Utterance;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Arguments for the two request tools.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct RequestArgs {
    /// The user's request, forwarded to the home controller agent verbatim.
    #[schemars(description = "The user's request, forwarded to the home controller agent")]
    pub prompt: String,
}

/// The MCP service wrapping an [`AgentBackend`].
///
/// Each tool performs exactly one outbound call and relays the agent's reply
/// text verbatim; failures are reported as tool errors and never retried.
pub struct CosmoToolService {
    backend: Arc<dyn AgentBackend>,
    instructions: String,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for CosmoToolService {
    /// Advertises tool support and hands the routing prompt to the host.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(self.instructions.clone()),
            ..Default::default()
        }
    }
}

#[tool_router]
impl CosmoToolService {
    /// Creates a new tool service over the given backend.
    ///
    /// `instructions` is the system prompt advertised to the hosting model;
    /// it carries the routing policy for the two tools.
    pub fn new(backend: Arc<dyn AgentBackend>, instructions: String) -> Self {
        Self {
            backend,
            instructions,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Send a simple request (such as controlling a small number of devices) to the home controller agent."
    )]
    pub async fn simple_request(&self, args: Parameters<RequestArgs>) -> Result<String, String> {
        let utterance = Utterance::new(args.0.prompt)
            .ok_or_else(|| "The prompt must not be empty.".to_string())?;
        info!(prompt = %utterance, "Executing tool 'simple_request'");
        let response = self
            .backend
            .simple_request(&utterance)
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.text)
    }

    #[tool(
        description = "Send a complex request (such as scene control or multi-step actions) to the home controller agent."
    )]
    pub async fn complex_request(&self, args: Parameters<RequestArgs>) -> Result<String, String> {
        let utterance = Utterance::new(args.0.prompt)
            .ok_or_else(|| "The prompt must not be empty.".to_string())?;
        info!(prompt = %utterance, "Executing tool 'complex_request'");
        let response = self
            .backend
            .complex_request(&utterance)
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.text)
    }
}
