//! MCP tool handlers for the docsearch server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::tools::{DocSearchTools, SearchParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;

/// The MCP server that exposes documentation search tools.
#[derive(Clone)]
pub struct DocSearchMcpServer {
    search_tools: DocSearchTools,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for DocSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "docsearch-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for generated documentation - searches page, section and symbol entries of a documentation site's search index and returns ranked results with locations and snippets.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDocsParams {
    query: String,
    /// Maximum number of results; 0 or a negative value returns every match
    #[serde(default)]
    limit: Option<i64>,
}

/// Map a caller-supplied limit onto the engine's convention, where 0 means all.
fn normalize_limit(limit: Option<i64>) -> Option<usize> {
    limit.map(|n| {
        if n <= 0 {
            0
        } else {
            usize::try_from(n).unwrap_or(usize::MAX)
        }
    })
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LocationParams {
    location: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// Tool router implementation
#[tool_router]
impl DocSearchMcpServer {
    /// Create a new docsearch MCP server.
    pub fn new(search_tools: DocSearchTools) -> Self {
        Self {
            search_tools,
            tool_router: Self::tool_router(),
        }
    }

    /// Search the documentation index.
    #[tool(
        description = "Search the documentation's pages, sections and symbols. Matches in titles and page names rank above matches in body text. Returns ranked results with location, page, title, category and a text snippet. Without a limit the server's configured default (MAX_SEARCH_RESULTS, 10 unless set) applies; pass limit 0 or a negative value for every match."
    )]
    async fn search_docs(
        &self,
        params: Parameters<SearchDocsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .search_tools
            .search(SearchParams {
                query: params.query.clone(),
                limit: normalize_limit(params.limit),
            })
            .map_err(invalid_params)?;

        json_result(&serde_json::json!({
            "query": params.query,
            "result_count": response.results.len(),
            "from_cache": response.from_cache,
            "results": response.results.iter().map(|m| {
                serde_json::json!({
                    "location": m.location,
                    "page": m.page,
                    "title": m.title,
                    "category": m.category,
                    "snippet": m.snippet,
                    "score": m.score,
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// Get every entry at a location.
    #[tool(
        description = "Get the full documentation entries at a location (URL fragment such as '#XPalm.Female'). A location may hold several entries."
    )]
    async fn get_documents(
        &self,
        params: Parameters<LocationParams>,
    ) -> Result<CallToolResult, McpError> {
        let location = params.0.location;
        let documents = self.search_tools.documents_at(&location);

        json_result(&serde_json::json!({
            "location": location,
            "documents": documents,
        }))
    }

    /// Report index size, categories and query metrics.
    #[tool(
        description = "Report the number of indexed entries, distinct terms, skipped malformed entries, entries per category and query/cache metrics"
    )]
    async fn index_stats(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.search_tools.stats())
    }

    /// Reload the index file.
    #[tool(
        description = "Re-read the documentation search index file and replace the served index once the new one is fully built"
    )]
    async fn reload_index(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: reload_index called");

        let summary = self.search_tools.reload().await.map_err(|e| {
            tracing::error!("Failed to reload index: {:?}", e);
            to_mcp_error(e)
        })?;

        json_result(&summary)
    }
}
