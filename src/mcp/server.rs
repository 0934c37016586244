//! MCP service wrapping the escrow dispatcher
//!
//! `tools/list` renders the static catalog; `tools/call` delegates to the
//! dispatcher. Dispatch failures become error-flagged tool results, never
//! protocol-level errors, so an agent can read the message and retry with
//! corrected arguments.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};

use crate::catalog;
use crate::dispatch::EscrowDispatcher;
use crate::sdk::EscrowSdk;

/// Linkd escrow MCP service
pub struct LinkdEscrowService<S> {
    dispatcher: Arc<EscrowDispatcher<S>>,
}

impl<S> Clone for LinkdEscrowService<S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<S: EscrowSdk> LinkdEscrowService<S> {
    pub fn new(sdk: S) -> Self {
        Self {
            dispatcher: Arc::new(EscrowDispatcher::new(sdk)),
        }
    }
}

/// Render the catalog as MCP tool descriptors
pub fn tool_listing() -> Vec<Tool> {
    catalog::CATALOG
        .iter()
        .map(|def| {
            Tool::new(
                Cow::Borrowed(def.name),
                Cow::Borrowed(def.description),
                Arc::new(def.input_schema()),
            )
        })
        .collect()
}

impl<S: EscrowSdk + 'static> ServerHandler for LinkdEscrowService<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Linkd Fund escrow tools for the Soroban ledger. Transaction tools return \
                 unsigned XDR envelopes for external signing; get_escrow_status and \
                 audit_expenditure_anchor are read-only."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: tool_listing(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        match self.dispatcher.dispatch(&request.name, &args).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {e}"
            ))])),
        }
    }
}
