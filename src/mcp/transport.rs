// ABOUTME: Newline-delimited JSON-RPC transport over stdin/stdout
// ABOUTME: One request per line in, one response per line out; logs never touch stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};

use super::request_processor::McpRequestProcessor;

/// Handles stdio transport for MCP communication
pub struct StdioTransport {
    processor: McpRequestProcessor,
}

impl StdioTransport {
    /// Creates a new stdio transport instance
    #[must_use]
    pub const fn new(processor: McpRequestProcessor) -> Self {
        Self { processor }
    }

    /// Serve stdin until EOF, writing responses to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready");
        let reader = BufReader::new(io::stdin());
        let mut writer = io::stdout();
        self.run_with(reader, &mut writer).await
    }

    /// Serve an arbitrary line reader and writer until EOF
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub async fn run_with<R, W>(&self, reader: R, writer: &mut W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.process_line(line).await {
                write_response(&response, writer).await?;
            }
        }
        info!("stdin closed; MCP stdio transport shutting down");
        Ok(())
    }

    /// Handle one line of input
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to parse MCP message: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        let id = message.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.processor.handle_request(request).await,
            Err(e) => {
                warn!("Invalid JSON-RPC request: {}", e);
                Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ))
            }
        }
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    response: &JsonRpcResponse,
    writer: &mut W,
) -> AppResult<()> {
    let response_json = serde_json::to_string(response)
        .map_err(|e| AppError::internal(format!("JSON serialization failed: {e}")))?;
    debug!("Sending MCP response: {}", response_json);

    writer
        .write_all(response_json.as_bytes())
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))
}
