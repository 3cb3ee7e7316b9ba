//! Tool catalog — typed metadata, parameter validation, request planning.
//!
//! The catalog owns both the metadata (names, parameter schemas, fallback
//! shapes) and the selection logic for every tool. Each entry carries a pure
//! *plan* function that maps validated arguments to either an upstream
//! request or a short-circuit skip; `invoke` runs the plan, delegates to the
//! gateway, and guarantees a non-null, well-typed result at the boundary.
//!
//! The registry is populated once at startup and never mutated after, so the
//! host gets a stable capability list without runtime reflection.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::gateway::{CrimeApi, QueryParams};
use crate::types::Error;

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    String,
    Int,
    Float,
    Optional(Box<ParamType>),
}

impl ParamType {
    /// Validate a JSON value against this parameter type.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            ParamType::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            ParamType::Int => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(format!("expected integer, got {}", value_type_name(value)))
                }
            }
            ParamType::Float => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(format!("expected number, got {}", value_type_name(value)))
                }
            }
            ParamType::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate(value)
                }
            }
        }
    }

    /// Human-readable type name for the capability list.
    pub fn display_name(&self) -> String {
        match self {
            ParamType::String => "string".to_string(),
            ParamType::Int => "integer".to_string(),
            ParamType::Float => "number".to_string(),
            ParamType::Optional(inner) => format!("{}?", inner.display_name()),
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single parameter definition for a tool.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub default: Option<Value>,
}

impl ParamDef {
    pub fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            default: None,
        }
    }

    pub fn optional(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type: ParamType::Optional(Box::new(param_type)),
            description,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && !matches!(self.param_type, ParamType::Optional(_))
    }
}

// =============================================================================
// Request planning
// =============================================================================

/// Declared shape of a tool's result, which fixes its empty fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// Ordered sequence of records; fallback `[]`.
    List,
    /// Single record; fallback `{}`.
    Record,
    /// Scalar string; fallback `""`.
    Scalar,
}

impl ReturnShape {
    /// The well-typed empty value substituted when no real result exists.
    pub fn fallback(&self) -> Value {
        match self {
            ReturnShape::List => Value::Array(Vec::new()),
            ReturnShape::Record => Value::Object(Map::new()),
            ReturnShape::Scalar => Value::String(String::new()),
        }
    }
}

/// One planned upstream call: endpoint path plus query map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub endpoint: String,
    pub query: QueryParams,
}

impl RequestPlan {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: QueryParams::new(),
        }
    }

    pub fn with_query(endpoint: impl Into<String>, query: QueryParams) -> Self {
        Self {
            endpoint: endpoint.into(),
            query,
        }
    }
}

/// Outcome of a tool's parameter-selection logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Delegate to the gateway with this request.
    Call(RequestPlan),
    /// Unanswerable parameter combination — return the fallback, no call.
    Skip,
}

/// Post-processing applied to a successful payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Return the payload verbatim.
    Verbatim,
    /// Pull one string field out of the payload object.
    Field(&'static str),
}

/// Pure mapping from validated arguments to a request plan.
pub type PlanFn = fn(&Map<String, Value>) -> crate::types::Result<Plan>;

// =============================================================================
// Tool spec
// =============================================================================

/// Complete tool entry: metadata plus selection logic.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParamDef>,
    pub shape: ReturnShape,
    pub extract: Extract,
    pub plan: PlanFn,
}

impl ToolSpec {
    /// Serialized capability entry for the host's `ListTools`.
    pub fn to_capability(&self) -> Value {
        let params: Vec<Value> = self
            .parameters
            .iter()
            .map(|p| {
                let mut entry = serde_json::json!({
                    "name": p.name,
                    "type": p.param_type.display_name(),
                    "required": p.is_required(),
                    "description": p.description,
                });
                if let Some(default) = &p.default {
                    entry["default"] = default.clone();
                }
                entry
            })
            .collect();

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": params,
        })
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool registry. Built once at startup, read-only after.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    entries: HashMap<&'static str, ToolSpec>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a tool spec.
    pub fn register(&mut self, spec: ToolSpec) -> crate::types::Result<()> {
        if spec.name.is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        if self.entries.contains_key(spec.name) {
            return Err(Error::validation(format!(
                "Duplicate tool name: {}",
                spec.name
            )));
        }
        self.entries.insert(spec.name, spec);
        Ok(())
    }

    /// Get a tool spec by name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.entries.get(name)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all tool names, sorted.
    pub fn list_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// List all tool specs, sorted by name.
    pub fn list_entries(&self) -> Vec<&ToolSpec> {
        let mut entries: Vec<&ToolSpec> = self.entries.values().collect();
        entries.sort_by_key(|s| s.name);
        entries
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate arguments against a tool's parameter definitions.
    ///
    /// Returns a list of validation errors (empty = valid).
    pub fn validate_params(
        &self,
        name: &str,
        args: &Value,
    ) -> crate::types::Result<Vec<String>> {
        let spec = self
            .entries
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", name)))?;

        let arg_map = args
            .as_object()
            .ok_or_else(|| Error::validation("Arguments must be a JSON object"))?;

        let mut errors = Vec::new();

        // Required parameters must be present and non-null. A key bound to
        // null is "explicitly not supplied", so a required null is missing.
        for param_def in &spec.parameters {
            if param_def.is_required() {
                match arg_map.get(param_def.name) {
                    Some(v) if !v.is_null() => {}
                    _ => errors.push(format!("Missing required parameter: {}", param_def.name)),
                }
            }
        }

        let known: HashMap<&str, &ParamDef> = spec
            .parameters
            .iter()
            .map(|p| (p.name, p))
            .collect();

        for (key, value) in arg_map {
            if let Some(param_def) = known.get(key.as_str()) {
                if let Err(e) = param_def.param_type.validate(value) {
                    errors.push(format!("Parameter '{}': {}", key, e));
                }
            } else {
                errors.push(format!("Unknown parameter: {}", key));
            }
        }

        Ok(errors)
    }

    /// Fill in default values for missing optional parameters.
    pub fn fill_defaults(&self, name: &str, args: &mut Value) -> crate::types::Result<()> {
        let spec = self
            .entries
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", name)))?;

        if let Some(map) = args.as_object_mut() {
            for param_def in &spec.parameters {
                let absent = match map.get(param_def.name) {
                    None => true,
                    Some(v) => v.is_null(),
                };
                if absent {
                    if let Some(default) = &param_def.default {
                        map.insert(param_def.name.to_string(), default.clone());
                    }
                }
            }
        }

        Ok(())
    }

    /// Invoke a tool: validate → plan → delegate → coalesce.
    ///
    /// Returns the parsed upstream payload, or the tool's declared fallback
    /// when the plan skips or the gateway reports absence. The only error
    /// paths are caller-contract violations: unknown tool, or a required
    /// parameter the binding cannot reconcile.
    pub async fn invoke(
        &self,
        name: &str,
        args: Value,
        gateway: &dyn CrimeApi,
    ) -> crate::types::Result<Value> {
        let spec = self
            .entries
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", name)))?;

        let mut args = if args.is_null() {
            Value::Object(Map::new())
        } else {
            args
        };

        let errors = self.validate_params(name, &args)?;
        if !errors.is_empty() {
            return Err(Error::validation(errors.join("; ")));
        }
        self.fill_defaults(name, &mut args)?;

        // validate_params guarantees an object here
        let arg_map = args
            .as_object()
            .ok_or_else(|| Error::validation("Arguments must be a JSON object"))?;

        let plan = match (spec.plan)(arg_map)? {
            Plan::Call(plan) => plan,
            Plan::Skip => {
                tracing::debug!(tool = name, "parameter selection unsatisfied, returning fallback");
                return Ok(spec.shape.fallback());
            }
        };

        tracing::debug!(tool = name, endpoint = %plan.endpoint, "delegating to gateway");
        let payload = gateway.request(&plan.endpoint, &plan.query).await;
        Ok(coalesce(spec, payload))
    }
}

/// Apply the spec's extraction to an optional payload, substituting the
/// fallback for absence. A JSON `null` payload counts as absent.
fn coalesce(spec: &ToolSpec, payload: Option<Value>) -> Value {
    let payload = match payload {
        Some(Value::Null) | None => return spec.shape.fallback(),
        Some(v) => v,
    };

    match spec.extract {
        Extract::Verbatim => payload,
        Extract::Field(field) => payload
            .get(field)
            .and_then(|v| v.as_str())
            .map(|s| Value::String(s.to_string()))
            .unwrap_or_else(|| spec.shape.fallback()),
    }
}

// =============================================================================
// Tests
// =============================================================================
