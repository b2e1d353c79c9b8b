//! Application service layer.
//!
//! Services validate requests and orchestrate calls to the receipt service
//! client. They provide a clean boundary between the MCP handlers and the
//! HTTP transport.

mod receipt_service;

pub use receipt_service::{
    receipt_file_name, DownloadedReceipt, ReceiptService, ReceiptServiceImpl, VerifiedReceipt,
};
