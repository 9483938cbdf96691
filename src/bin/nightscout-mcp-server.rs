// ABOUTME: Stdio MCP server binary exposing Nightscout CGM data as tools
// ABOUTME: Loads environment configuration, wires client, service, and registry, then serves stdin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nightscout MCP Server Binary
//!
//! Reads newline-delimited JSON-RPC requests from stdin and writes responses
//! to stdout. Logs go to stderr.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use nightscout_mcp_server::{
    config::ServerConfig,
    formatters::DisplaySettings,
    logging::{LogFormat, LoggingConfig},
    mcp::{McpRequestProcessor, StdioTransport},
    services::GlucoseService,
    tools::{ToolExecutionContext, ToolRegistry},
    units::GlucoseUnit,
};
use nightscout_providers::initialize_shared_client;
use tracing::{error, info, warn};

/// Display unit accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnitsArg {
    /// Milligrams per deciliter
    Mgdl,
    /// Millimoles per liter
    Mmol,
}

impl From<UnitsArg> for GlucoseUnit {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::Mgdl => Self::MgDl,
            UnitsArg::Mmol => Self::Mmol,
        }
    }
}

#[derive(Parser)]
#[command(name = "nightscout-mcp-server")]
#[command(about = "Nightscout MCP server - CGM glucose data and analysis for LLMs over stdio")]
#[command(version)]
struct Args {
    /// Override the display unit (GLUCOSE_UNITS)
    #[arg(long, value_enum)]
    units: Option<UnitsArg>,

    /// Override the log format (LOG_FORMAT)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(format) = args.log_format {
        logging = logging.with_format(format);
    }
    logging.init()?;

    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Some(units) = args.units {
        config = config.with_units(units.into());
    }
    info!("{}", config.summary());

    if !initialize_shared_client(config.http_client_settings()) {
        warn!("Configured HTTP timeouts were not applied");
    }
    let client = config.build_client()?;

    let service = Arc::new(GlucoseService::new(Arc::new(client), &config));
    let context = ToolExecutionContext::new(service, DisplaySettings::from_config(&config));

    let mut registry = ToolRegistry::new();
    registry.register_builtin_tools();

    let processor =
        McpRequestProcessor::new(Arc::new(registry), context, config.server_version.clone());
    StdioTransport::new(processor).run().await?;

    info!("Nightscout MCP server stopped");
    Ok(())
}
