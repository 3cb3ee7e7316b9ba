//! Stop-and-search tools: by area, by location, unmapped, and by force.
//!
//! The two force-scoped variants rename `force_id` to the upstream query key
//! `force`; that rename is intentional and covered by the round-trip tests.

use serde_json::{Map, Value};

use crate::catalog::{
    Extract, ParamDef, ParamType, Plan, RequestPlan, ReturnShape, ToolCatalog, ToolSpec,
};
use crate::tools::{date_query, req_number, req_str, resolve_area};
use crate::types::Result;

pub fn register(catalog: &mut ToolCatalog) -> Result<()> {
    catalog.register(ToolSpec {
        name: "get_stop_searches_by_area",
        description: "Retrieve stop and searches within a 1-mile radius or custom area.",
        parameters: vec![
            ParamDef::optional("lat", ParamType::Float, "Latitude of the centre point."),
            ParamDef::optional("lng", ParamType::Float, "Longitude of the centre point."),
            ParamDef::optional("poly", ParamType::String, "Lat/lng pairs defining a polygon."),
            ParamDef::optional("date", ParamType::String, "Specific month (YYYY-MM)."),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: stop_searches_by_area,
    })?;

    catalog.register(ToolSpec {
        name: "get_stop_searches_by_location",
        description: "Retrieve stop and searches at a specific location by ID.",
        parameters: vec![
            ParamDef::required("location_id", ParamType::Int, "The ID of the location."),
            ParamDef::optional("date", ParamType::String, "Specific month (YYYY-MM)."),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: stop_searches_by_location,
    })?;

    catalog.register(ToolSpec {
        name: "get_stop_searches_no_location",
        description: "Retrieve stop and searches that could not be mapped to a location.",
        parameters: force_scoped_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: stop_searches_no_location,
    })?;

    catalog.register(ToolSpec {
        name: "get_stop_searches_by_force",
        description: "Retrieve stop and searches reported by a specific force.",
        parameters: force_scoped_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: stop_searches_by_force,
    })?;

    Ok(())
}

fn force_scoped_params() -> Vec<ParamDef> {
    vec![
        ParamDef::required("force_id", ParamType::String, "The unique identifier for the force."),
        ParamDef::optional("date", ParamType::String, "Specific month (YYYY-MM)."),
    ]
}

fn stop_searches_by_area(args: &Map<String, Value>) -> Result<Plan> {
    let Some(area) = resolve_area(args, false, true) else {
        return Ok(Plan::Skip);
    };
    let mut query = date_query(args);
    area.apply(&mut query);
    Ok(Plan::Call(RequestPlan::with_query("stops-street", query)))
}

fn stop_searches_by_location(args: &Map<String, Value>) -> Result<Plan> {
    let mut query = date_query(args);
    query.insert("location_id".to_string(), req_number(args, "location_id")?);
    Ok(Plan::Call(RequestPlan::with_query("stops-at-location", query)))
}

fn force_scoped(args: &Map<String, Value>, endpoint: &'static str) -> Result<Plan> {
    let mut query = date_query(args);
    query.insert("force".to_string(), req_str(args, "force_id")?.to_string());
    Ok(Plan::Call(RequestPlan::with_query(endpoint, query)))
}

fn stop_searches_no_location(args: &Map<String, Value>) -> Result<Plan> {
    force_scoped(args, "stops-no-location")
}

fn stop_searches_by_force(args: &Map<String, Value>) -> Result<Plan> {
    force_scoped(args, "stops-force")
}
