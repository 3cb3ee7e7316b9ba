//! IPC request router — routes by method, delegates to the catalog.

use serde_json::Value;
use std::sync::Arc;

use crate::catalog::ToolCatalog;
use crate::gateway::CrimeApi;
use crate::types::{Error, Result, SERVICE_NAME};

/// Shared, read-only dispatch state. Built once at startup; invocations hold
/// no locks, so concurrent connections are naturally independent.
#[derive(Clone)]
pub struct Router {
    catalog: Arc<ToolCatalog>,
    gateway: Arc<dyn CrimeApi>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("tools", &self.catalog.len())
            .finish()
    }
}

impl Router {
    pub fn new(catalog: Arc<ToolCatalog>, gateway: Arc<dyn CrimeApi>) -> Self {
        Self { catalog, gateway }
    }

    /// Route one decoded request to a handler.
    pub async fn route_request(&self, method: &str, body: &Value) -> Result<Value> {
        match method {
            "CallTool" => {
                let tool = str_field(body, "tool")?;
                let args = body.get("args").cloned().unwrap_or(Value::Null);
                self.catalog.invoke(&tool, args, self.gateway.as_ref()).await
            }
            "ListTools" => {
                let tools: Vec<Value> = self
                    .catalog
                    .list_entries()
                    .iter()
                    .map(|spec| spec.to_capability())
                    .collect();
                Ok(serde_json::json!({
                    "service": SERVICE_NAME,
                    "tools": tools,
                    "count": tools.len(),
                }))
            }
            _ => Err(Error::not_found(format!("Unknown method: {}", method))),
        }
    }
}

pub fn str_field(body: &Value, key: &str) -> Result<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::validation(format!("Missing required field: {}", key)))
}
