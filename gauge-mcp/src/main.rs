//! Gauge MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. stdout carries protocol
//! messages only; logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between two units of one category
//! - list_categories: List categories in display order
//! - list_units: List the units of a category in display order
//!
//! Environment:
//! - RUST_LOG: log filter (default "info")
//! - GAUGE_DECIMALS: digits after the decimal point in results (default 4)

use gauge_core::{GaugeError, DEFAULT_DECIMALS};
use gauge_units::{ConversionError, Converter, Selector, unit_index};
use std::env;
use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "gauge";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest accepted GAUGE_DECIMALS
const MAX_DECIMALS: usize = 12;

/// Server configuration read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Config {
    decimals: usize,
}

impl Config {
    fn from_env() -> Self {
        Self::from_decimals_var(env::var("GAUGE_DECIMALS").ok().as_deref())
    }

    fn from_decimals_var(raw: Option<&str>) -> Self {
        let decimals = match raw.map(str::trim) {
            None | Some("") => DEFAULT_DECIMALS,
            Some(s) => match s.parse::<usize>() {
                Ok(n) if n <= MAX_DECIMALS => n,
                _ => {
                    tracing::warn!(value = s, default = DEFAULT_DECIMALS, "ignoring invalid GAUGE_DECIMALS");
                    DEFAULT_DECIMALS
                }
            },
        };
        Self { decimals }
    }

    fn converter(&self) -> Converter {
        Converter::new().with_decimals(self.decimals)
    }
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertArgs {
    category: Selector,
    from: Selector,
    to: Selector,
    #[serde(default)]
    value: JsonValue,
}

#[derive(Debug, Deserialize)]
struct ListUnitsArgs {
    category: Selector,
}

fn main() {
    init_logging();

    let config = Config::from_env();
    let converter = config.converter();

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, decimals = converter.decimals(), "Gauge MCP server started");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                tracing::debug!(bytes = line.len(), "received request");

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!(error = %e, "unparsable request");
                        let response = McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        };
                        if let Err(e) = write_response(&response) {
                            tracing::error!(error = %e, "failed to write response");
                            break;
                        }
                        continue;
                    }
                };

                let response = handle_request(&converter, &request);

                // Notifications (no id) get no response
                if request.id.is_none() {
                    tracing::debug!(method = %request.method, "notification processed");
                    continue;
                }

                if let Err(e) = write_response(&response) {
                    tracing::error!(error = %e, "failed to write response");
                    break;
                }

                tracing::debug!(method = %request.method, "sent response");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    tracing::info!("server shutting down");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

fn handle_request(converter: &Converter, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(converter, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion for length, mass, temperature, time and speed"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_categories and list_units to discover units, then convert. Categories and units may be given by name or by zero-based position."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let selector = json!({
        "oneOf": [
            { "type": "string" },
            { "type": "integer", "minimum": 0 }
        ]
    });

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category. Result has a fixed number of decimals.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": selector.clone(),
                        "from": selector.clone(),
                        "to": selector.clone(),
                        "value": {
                            "oneOf": [{ "type": "string" }, { "type": "number" }],
                            "description": "Value to convert, e.g. \"12.5\""
                        }
                    },
                    "required": ["category", "from", "to", "value"]
                }
            },
            {
                "name": "list_categories",
                "description": "List measurement categories in display order with their base unit.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": selector
                    },
                    "required": ["category"]
                }
            }
        ]
    }))
}

fn handle_tool_call(converter: &Converter, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(converter, args),
        "list_categories" => tool_list_categories(),
        "list_units" => tool_list_units(args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert(converter: &Converter, args: JsonValue) -> Result<JsonValue, McpError> {
    let args: ConvertArgs = serde_json::from_value(args)
        .map_err(|e| McpError::invalid_params(format!("Invalid convert arguments: {}", e)))?;

    let input = match &args.value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Null => String::new(),
        other => return Err(McpError::invalid_params(format!("value must be a string or number, got {}", other))),
    };

    match converter.convert_selected(&args.category, &args.from, &args.to, &input) {
        Ok(c) => Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("{} {} = {} {}", input.trim(), c.from.name(), c.text, c.to.name())
            }],
            "result": c.text,
            "category": c.category.name(),
            "from_index": unit_index(c.category, c.from).ok(),
            "to_index": unit_index(c.category, c.to).ok(),
            "isError": false
        })),
        Err(e) => {
            let field = match e {
                ConversionError::InvalidUnit { .. } => Some(rejected_unit(&args)),
                _ => None,
            };
            Ok(tool_error(e, field))
        }
    }
}

/// Which unit selector failed. `from` is resolved first, so it wins when both are bad.
fn rejected_unit(args: &ConvertArgs) -> &'static str {
    let from_ok = args.category.category()
        .and_then(|category| args.from.unit(category))
        .is_ok();
    if from_ok { "to" } else { "from" }
}

fn tool_list_categories() -> Result<JsonValue, McpError> {
    let categories: Vec<JsonValue> = gauge_units::categories().iter()
        .map(|c| json!({
            "index": c.index(),
            "name": c.name(),
            "base_unit": c.base_unit().name(),
        }))
        .collect();

    let names: Vec<&str> = gauge_units::categories().iter().map(|c| c.name()).collect();

    Ok(json!({
        "content": [{ "type": "text", "text": names.join(", ") }],
        "categories": categories,
        "isError": false
    }))
}

fn tool_list_units(args: JsonValue) -> Result<JsonValue, McpError> {
    let args: ListUnitsArgs = serde_json::from_value(args)
        .map_err(|e| McpError::invalid_params(format!("Invalid list_units arguments: {}", e)))?;

    let category = match args.category.category() {
        Ok(c) => c,
        Err(e) => return Ok(tool_error(e, None)),
    };

    let mut units = Vec::new();
    for (index, unit) in gauge_units::units_of(category).iter().enumerate() {
        let rule = match unit.rule() {
            Ok(rule) => rule,
            Err(e) => return Ok(tool_error(e, None)),
        };
        units.push(json!({
            "index": index,
            "name": unit.name(),
            "symbol": unit.symbol(),
            "base": unit.is_base(),
            "rule": rule,
        }));
    }

    let names: Vec<&str> = gauge_units::units_of(category).iter().map(|u| u.name()).collect();

    Ok(json!({
        "content": [{ "type": "text", "text": format!("{}: {}", category, names.join(", ")) }],
        "category": category.name(),
        "units": units,
        "isError": false
    }))
}

/// Engine failures are tool results, not protocol errors
fn tool_error(err: ConversionError, field: Option<&str>) -> JsonValue {
    let message = err.to_string();
    let mut structured: GaugeError = err.into();
    if let Some(field) = field {
        structured = structured.for_field(field);
    }

    // Empty or mistyped values are routine; bad selectors usually mean a confused client
    if structured.is_input_error() {
        tracing::debug!(error = %message, "conversion rejected");
    } else {
        tracing::warn!(error = %message, code = %structured.code, "conversion rejected");
    }

    json!({
        "content": [{ "type": "text", "text": message }],
        "error": structured.to_json(),
        "isError": true
    })
}
