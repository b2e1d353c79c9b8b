//! MCP tool handlers for the receipt form server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::config::Config;
use crate::domain::{clean_phone, filter_keystroke, format_phone, is_valid_phone, Key};
use crate::error::ReceiptApiError;
use crate::form::{FormCapabilities, MemorySessionStore, ReceiptForm};
use crate::formatting::{format_currency, format_date};
use crate::metrics::Metrics;
use crate::services::ReceiptService;
use crate::ui::{AlertBoard, AlertPresenter, LoadingModal, MemoryClipboard};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing phone formatting and the receipt verification flow.
#[derive(Clone)]
pub struct ReceiptFormServer {
    receipt_service: Option<Arc<dyn ReceiptService>>,
    config: Arc<Config>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for ReceiptFormServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "receipt-form".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Receipt downloader form tools - phone number masking and validation, currency and date display formatting, and receipt verification and download.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PhoneParams {
    phone: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct KeysParams {
    /// Key tokens in order: single characters or key names such as "Backspace"
    keys: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CurrencyParams {
    amount: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DateParams {
    date: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ReceiptParams {
    receipt_id: String,
    phone_number: String,
}

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

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl ReceiptFormServer {
    /// Create a new server. Without a receipt service, verification and
    /// download tools report that the service is not configured.
    pub fn new(
        receipt_service: Option<Arc<dyn ReceiptService>>,
        config: Config,
        metrics: Metrics,
    ) -> Self {
        Self {
            receipt_service,
            config: Arc::new(config),
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// A fresh form wired to in-memory capabilities.
    fn new_form(&self) -> (ReceiptForm, AlertBoard) {
        let alerts = AlertBoard::from_config(&self.config);
        let capabilities = FormCapabilities {
            modal: Arc::new(LoadingModal::new()),
            alerts: Arc::new(alerts.clone()),
            clipboard: Arc::new(MemoryClipboard::new()),
            session: Arc::new(MemorySessionStore::new()),
        };
        let form = ReceiptForm::new(capabilities, &self.config).with_metrics(self.metrics.clone());
        (form, alerts)
    }

    fn service(&self) -> Result<&Arc<dyn ReceiptService>, ReceiptApiError> {
        self.receipt_service
            .as_ref()
            .ok_or(ReceiptApiError::NotConfigured)
    }

    /// Format a phone number with the (DDD) DDD-DDDD display mask.
    #[tool(
        description = "Format a phone number for display as (DDD) DDD-DDDD. Non-digits are stripped first; digits past the tenth follow the last group."
    )]
    async fn format_phone(
        &self,
        params: Parameters<PhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let phone = params.0.phone;

        json_result(&serde_json::json!({
            "input": phone,
            "formatted": format_phone(&phone),
            "digits": clean_phone(&phone),
        }))
    }

    /// Strip a phone number down to its digits.
    #[tool(description = "Strip every non-digit character from a phone number")]
    async fn clean_phone(&self, params: Parameters<PhoneParams>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(clean_phone(
            &params.0.phone,
        ))]))
    }

    /// Check whether a phone number can be submitted.
    #[tool(
        description = "Check whether a phone number would pass form validation (7 to 15 digits)"
    )]
    async fn validate_phone(
        &self,
        params: Parameters<PhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let phone = params.0.phone;
        let digits = clean_phone(&phone);
        let valid = is_valid_phone(&phone);

        json_result(&serde_json::json!({
            "valid": valid,
            "digit_count": digits.len(),
            "message": if valid { None } else { Some("Please enter a valid phone number") },
        }))
    }

    /// Classify key tokens against the phone field's keystroke filter.
    #[tool(
        description = "Check which key presses the phone field accepts: digits, whitespace, parentheses, dashes, Backspace, Delete, Tab and Enter"
    )]
    async fn filter_keystrokes(
        &self,
        params: Parameters<KeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let results: Vec<_> = params
            .0
            .keys
            .iter()
            .map(|key| serde_json::json!({ "key": key, "allowed": filter_keystroke(key) }))
            .collect();

        json_result(&serde_json::json!({ "keys": results }))
    }

    /// Type keys into a fresh phone field and report the display after each.
    #[tool(
        description = "Type a sequence of keys into an empty phone field with live masking. Returns the displayed value after every key; Enter submits the form."
    )]
    async fn simulate_phone_typing(
        &self,
        params: Parameters<KeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let (mut form, alerts) = self.new_form();

        let steps: Vec<_> = params
            .0
            .keys
            .iter()
            .map(|token| form.type_key(&Key::parse(token)))
            .collect();

        let value = form.field().value().to_string();
        tracing::debug!(keys = steps.len(), value = %value, "Simulated phone typing");

        json_result(&serde_json::json!({
            "steps": steps,
            "value": value,
            "state": form.field().state(),
            "valid": is_valid_phone(&value),
            "alerts": alerts.active(),
        }))
    }

    /// Format an amount as US dollars.
    #[tool(description = "Format an amount as US dollars, e.g. $1,234.56")]
    async fn format_currency(
        &self,
        params: Parameters<CurrencyParams>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = format_currency(params.0.amount).map_err(invalid_params)?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Format a timestamp for display.
    #[tool(
        description = "Format a timestamp (RFC 3339, YYYY-MM-DD HH:MM:SS or YYYY-MM-DD) as e.g. January 5, 2024 at 03:07 PM"
    )]
    async fn format_date(&self, params: Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let formatted = format_date(&params.0.date).map_err(invalid_params)?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Validate a phone number and submit it to verify a receipt.
    #[tool(
        description = "Submit the receipt verification form: validates the phone number, then asks the receipt service for the receipt page"
    )]
    async fn verify_receipt(
        &self,
        params: Parameters<ReceiptParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (mut form, alerts) = self.new_form();

        form.input(&params.phone_number);
        let phone = match form.submit() {
            Ok(phone) => phone,
            Err(e) => {
                return json_result(&serde_json::json!({
                    "verified": false,
                    "error": e.to_string(),
                    "alerts": alerts.active(),
                }));
            }
        };

        let result = match self.service() {
            Ok(service) => service.verify(&params.receipt_id, phone.as_str()).await,
            Err(e) => Err(e),
        };
        form.finish_verification();

        match result {
            Ok(verified) => json_result(&serde_json::json!({
                "verified": true,
                "receipt_id": verified.receipt_id,
                "phone": phone.formatted(),
                "page_html": verified.page_html,
            })),
            Err(e) => {
                tracing::error!("Failed to verify receipt {}: {}", params.receipt_id, e);
                alerts.show_error(&e.to_string());
                json_result(&serde_json::json!({
                    "verified": false,
                    "error": e.to_string(),
                    "alerts": alerts.active(),
                }))
            }
        }
    }

    /// Download a receipt PDF into the configured download directory.
    #[tool(
        description = "Download a receipt as PDF into the configured download directory. The phone number must match the receipt."
    )]
    async fn download_receipt(
        &self,
        params: Parameters<ReceiptParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let downloaded = self
            .service()
            .map_err(to_mcp_error)?
            .download_to(
                &params.receipt_id,
                &params.phone_number,
                &self.config.download_dir,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to download receipt {}: {}", params.receipt_id, e);
                to_mcp_error(e)
            })?;

        json_result(&serde_json::to_value(&downloaded).map_err(to_mcp_error)?)
    }

    /// Check the receipt service and report form metrics.
    #[tool(description = "Check that the receipt service is reachable and report form metrics")]
    async fn check_receipt_service(&self) -> Result<CallToolResult, McpError> {
        let health = match self.service() {
            Ok(service) => service
                .health()
                .await
                .map(|h| serde_json::json!(h))
                .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };

        json_result(&serde_json::json!({
            "service": health,
            "metrics": self.metrics.summary(),
        }))
    }
}
