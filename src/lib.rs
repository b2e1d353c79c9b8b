//! Receipt Form - phone input masking and the receipt verification form,
//! served over the Model Context Protocol.
//!
//! The receipt download page asks for the phone number on file before it
//! releases a receipt. This library models that form headlessly and exposes
//! it to AI assistants through an MCP server.
//!
//! # Architecture
//!
//! - **domain**: Phone cleaning, masking and validation, the keystroke filter, value objects
//! - **form**: The live-masked phone field and the verification form controller
//! - **ui**: Capability traits for the modal, alerts and clipboard, with in-memory implementations
//! - **formatting**: Currency and date display helpers
//! - **client**: HTTP client for the receipt service
//! - **services**: Receipt verification and download
//! - **server**: MCP protocol server
//! - **config**, **error**, **metrics**: Ambient configuration, error types and counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod formatting;
pub mod metrics;
pub mod server;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use client::{AsyncReceiptClient, AsyncReceiptClientImpl, HealthStatus, ReceiptClient};
pub use config::Config;
pub use domain::{clean_phone, filter_keystroke, format_phone, is_valid_phone, Key, PhoneNumber};
pub use error::{ConfigError, FormError, FormatError, ReceiptApiError};
pub use form::{FormCapabilities, PhoneField, ReceiptForm};
pub use formatting::{format_currency, format_date};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use server::ReceiptFormServer;
pub use services::{ReceiptService, ReceiptServiceImpl};
