//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use gradewise_core::Config;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::GradewiseServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Logs go to stderr and the optional JSONL file, so stdout stays reserved
/// for the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    info!(
        target_grade = config.target_grade.as_u8(),
        max_input_bytes = ?max_input_bytes,
        "starting MCP server on stdio"
    );

    let service = GradewiseServer::new(config, max_input_bytes)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
