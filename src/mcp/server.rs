/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests
/// 2. Routes tool calls to the habit tracker tools
/// 3. Writes one JSON-RPC response line per request

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{DailyPodServer, ServerError};

/// MCP server that handles communication with a client
pub struct McpServer {
    /// The underlying habit tracker
    tracker: DailyPodServer,
    /// Whether the client has finished the initialize handshake
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tracker: DailyPodServer) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Give back the habit tracker once serving is done
    pub fn into_inner(self) -> DailyPodServer {
        self.tracker
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until it is exhausted
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut line = String::new();
        loop {
            line.clear();

            if reader.read_line(&mut line).await? == 0 {
                info!("MCP server shutting down (input closed)");
                break;
            }

            if let Some(response) = self.process_line(&line) {
                let response_str = serde_json::to_string(&response)?;

                writer.write_all(response_str.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;

                debug!("Sent response: {}", response_str);
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle a JSON-RPC request that expects a response
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
            );
        }

        let outcome = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "initialized" => {
                self.initialized = true;
                Ok(Value::Null)
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(request.params),
            other => Err((error_codes::METHOD_NOT_FOUND, format!("Method '{}' not found", other))),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        }
    }

    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                (error_codes::INVALID_PARAMS, format!("Invalid initialize parameters: {}", e))
            })?
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!(
                "MCP client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            ),
            None => info!("MCP client connected"),
        }
        if let Some(version) = params.protocol_version.as_deref() {
            if version != MCP_VERSION {
                warn!("Client requested protocol {}, answering with {}", version, MCP_VERSION);
            }
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: "DailyPod Habit Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_result(&result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params =
            params.ok_or_else(|| (error_codes::INVALID_PARAMS, "Missing parameters".to_string()))?;
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| (error_codes::INVALID_PARAMS, format!("Invalid parameters: {}", e)))?;

        if !self.initialized {
            debug!("Tool '{}' called before initialization finished", call.name);
        }

        let result = self.call_tool(&call.name, call.arguments);
        to_result(&result)
    }

    /// Dispatch a tool by name
    fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let storage = self.tracker.storage();
        let today = self.tracker.today();

        let outcome = match name {
            "habit_create" => {
                parse_args(args).and_then(|p| tools::create_habit(storage, p).map(|r| r.message))
            }
            "habit_update" => {
                parse_args(args).and_then(|p| tools::update_habit(storage, p).map(|r| r.message))
            }
            "habit_delete" => {
                parse_args(args).and_then(|p| tools::delete_habit(storage, p).map(|r| r.message))
            }
            "habit_list" => parse_args(args)
                .and_then(|p| tools::list_habits(storage, p, today).map(|r| r.message)),
            "habit_toggle" => parse_args(args)
                .and_then(|p| tools::toggle_habit(storage, p, today).map(|r| r.message)),
            "habit_stats" => parse_args(args)
                .and_then(|p| tools::get_habit_stats(storage, p, today).map(|r| r.message)),
            "habit_today" => parse_args(args)
                .and_then(|p| tools::get_today(storage, p, today).map(|r| r.message)),
            "habit_overview" => parse_args(args)
                .and_then(|p| tools::get_overview(storage, p, today).map(|r| r.message)),
            _ => return ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        match outcome {
            Ok(message) => ToolCallResult::success(message),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

/// Deserialize tool arguments into the tool's parameter struct
fn parse_args<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value).map_err(|e| (error_codes::INTERNAL_ERROR, e.to_string()))
}

fn tool<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = schemars::schema_for!(P);
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"})),
    }
}

/// Every tool this server offers
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::CreateHabitParams>("habit_create", "Create a new habit to track"),
        tool::<tools::UpdateHabitParams>(
            "habit_update",
            "Edit a habit's name, description, color, icon or target",
        ),
        tool::<tools::DeleteHabitParams>("habit_delete", "Delete a habit and all of its check-ins"),
        tool::<tools::ListHabitsParams>(
            "habit_list",
            "List all habits with streaks and completion rates",
        ),
        tool::<tools::ToggleHabitParams>(
            "habit_toggle",
            "Mark a habit done (or undo it) for today or a specific date",
        ),
        tool::<tools::HabitStatsParams>(
            "habit_stats",
            "Current and longest streak, total completions, 30-day rate and weekly progress \
             for one habit",
        ),
        tool::<tools::TodayParams>("habit_today", "Show which habits are done for a day"),
        tool::<tools::OverviewParams>(
            "habit_overview",
            "Totals across all habits: today's progress, average rate, streaks",
        ),
    ]
}
