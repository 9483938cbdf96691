// ABOUTME: MCP request processing and protocol handling for the stdio server
// ABOUTME: Validates, routes, and executes MCP protocol requests with proper error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::logging::AppLogger;
use crate::tools::{ToolExecutionContext, ToolRegistry};

use super::schema::{InitializeResponse, ToolCall, ToolResponse};

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    registry: Arc<ToolRegistry>,
    context: ToolExecutionContext,
    server_version: String,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub fn new(
        registry: Arc<ToolRegistry>,
        context: ToolExecutionContext,
        server_version: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            context,
            server_version: server_version.into(),
        }
    }

    /// Handle an MCP request; notifications produce no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        debug!(method = %request.method, id = ?request.id, "Received MCP request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification received; no response sent");
            return None;
        }

        let method = request.method.clone();
        let response = self.process_request(request).await;
        AppLogger::log_mcp_request(&method, response.is_success());
        debug!(
            method = %method,
            elapsed_ms = start_time.elapsed().as_millis(),
            "MCP request completed"
        );
        Some(response)
    }

    async fn process_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                    request.jsonrpc
                ),
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request).await,
            _ => Self::handle_unknown_method(&request),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        debug!("Handling initialize request");
        match serde_json::to_value(InitializeResponse::new(self.server_version.clone())) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::from_app_error(id, &AppError::from(e)),
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        debug!("Handling tools/list request");
        JsonRpcResponse::success(id, json!({ "tools": self.registry.list_schemas() }))
    }

    /// Handle tools/call
    ///
    /// Protocol problems (bad params, unknown tool) are JSON-RPC errors; a
    /// failing tool is a successful response with `isError: true`.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let call = match Self::parse_tool_call(request.params) {
            Ok(call) => call,
            Err(e) => return JsonRpcResponse::from_app_error(request.id, &e),
        };

        if !self.registry.contains(&call.name) {
            warn!(tool = %call.name, "Unknown tool requested");
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", call.name),
            );
        }

        let arguments = call.arguments.unwrap_or_else(|| json!({}));
        let response = match self
            .registry
            .execute(&call.name, arguments, &self.context)
            .await
        {
            Ok(result) => result.into_response(),
            Err(e) => {
                error!(tool = %call.name, code = ?e.code, "Tool call failed: {}", e.message);
                ToolResponse::error_text(format!("Error: {}", e.message))
            }
        };

        match serde_json::to_value(response) {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => JsonRpcResponse::from_app_error(request.id, &AppError::from(e)),
        }
    }

    fn parse_tool_call(params: Option<Value>) -> AppResult<ToolCall> {
        let params = params.ok_or_else(|| AppError::invalid_input("tools/call requires params"))?;
        serde_json::from_value(params)
            .map_err(|e| AppError::invalid_input(format!("Invalid tools/call params: {e}")))
    }

    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!(method = %request.method, "Unknown MCP method");
        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )
    }
}
