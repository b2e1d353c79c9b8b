//! MCP server for the receipt form.
//!
//! Exposes phone formatting and the receipt verification flow to MCP clients
//! over stdio.

pub mod handlers;

pub use handlers::ReceiptFormServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the receipt form server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: ReceiptFormServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
