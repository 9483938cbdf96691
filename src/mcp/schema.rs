// ABOUTME: MCP protocol schema definitions for the stdio server
// ABOUTME: Tool schemas, tools/call responses, content blocks, and the initialize handshake
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the parts of the Model Context Protocol this
//! server speaks. Field names follow the protocol's camelCase via serde renames.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::constants::protocol::{MCP_PROTOCOL_VERSION, SERVER_NAME};

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name identifier
    pub name: String,
    /// Human-readable tool description
    pub description: String,
    /// JSON Schema for tool input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema type (always "object" for tool inputs)
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property definitions for object schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// List of required property names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema over the given properties
    #[must_use]
    pub fn object(properties: HashMap<String, PropertySchema>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required.iter().map(|name| (*name).to_owned()).collect())
            },
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    /// Property type (string, number, integer, boolean)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Human-readable property description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default applied when the argument is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive lower bound for numeric properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numeric properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Allowed values for string properties
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl PropertySchema {
    fn typed(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
            default: None,
            minimum: None,
            maximum: None,
            allowed: None,
        }
    }

    /// String property
    #[must_use]
    pub fn string(description: &str) -> Self {
        Self::typed("string", description)
    }

    /// Integer property with inclusive bounds
    #[must_use]
    pub fn integer(description: &str, minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: Some(minimum as f64),
            maximum: Some(maximum as f64),
            ..Self::typed("integer", description)
        }
    }

    /// Number property with inclusive bounds
    #[must_use]
    pub fn number(description: &str, minimum: f64, maximum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
            ..Self::typed("number", description)
        }
    }

    /// Attach a default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict a string property to a fixed set of values
    #[must_use]
    pub fn with_allowed(mut self, allowed: &[&str]) -> Self {
        self.allowed = Some(allowed.iter().map(|v| (*v).to_owned()).collect());
        self
    }
}

/// MCP Tool Call Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub name: String,
    /// Tool arguments as JSON value
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// MCP Tool Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Response content blocks
    pub content: Vec<Content>,
    /// Whether this response represents an error
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Optional structured content for rich responses
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolResponse {
    /// Error response carrying a single text block
    #[must_use]
    pub fn error_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: true,
            structured_content: None,
        }
    }
}

/// MCP Content Types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text content
    #[serde(rename = "text")]
    Text {
        /// Text content
        text: String,
    },
}

/// Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    /// Tool capability, the only one this server advertises
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools Capability
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsCapability {
    /// Whether the tool list can change at runtime
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// MCP protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server information
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Optional instructions for using this server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Handshake response for this server
    #[must_use]
    pub fn new(server_version: impl Into<String>) -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_owned(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_owned(),
                version: server_version.into(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some(
                "Read-only access to a Nightscout CGM site: current glucose, history, \
                 range and monthly analysis, treatments, server status, and device status."
                    .to_owned(),
            ),
        }
    }
}
