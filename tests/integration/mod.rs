//! End-to-end tests against on-disk databases and the MCP surface
mod mcp_flow;
