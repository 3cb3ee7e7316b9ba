//! Neighbourhood policing tools: per-force neighbourhood list, details,
//! boundary, team, events, priorities, and coordinate-based lookup.
//!
//! Neighbourhood endpoints are unusual upstream: the force id is the leading
//! path segment with no `forces/` prefix.

use serde_json::{Map, Value};

use crate::catalog::{
    Extract, ParamDef, ParamType, Plan, RequestPlan, ReturnShape, ToolCatalog, ToolSpec,
};
use crate::gateway::QueryParams;
use crate::tools::{req_number, req_str};
use crate::types::Result;

pub fn register(catalog: &mut ToolCatalog) -> Result<()> {
    catalog.register(ToolSpec {
        name: "get_neighbourhoods",
        description: "Retrieve a list of neighbourhoods for a specific police force.",
        parameters: vec![ParamDef::required(
            "force_id",
            ParamType::String,
            "The unique identifier for the force.",
        )],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: neighbourhoods,
    })?;

    catalog.register(ToolSpec {
        name: "get_neighbourhood_details",
        description: "Retrieve details for a specific neighbourhood within a force.",
        parameters: force_and_neighbourhood_params(),
        shape: ReturnShape::Record,
        extract: Extract::Verbatim,
        plan: neighbourhood_details,
    })?;

    catalog.register(ToolSpec {
        name: "get_neighbourhood_boundary",
        description: "Retrieve the boundary coordinates for a specific neighbourhood.",
        parameters: force_and_neighbourhood_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: neighbourhood_boundary,
    })?;

    catalog.register(ToolSpec {
        name: "get_neighbourhood_team",
        description: "Retrieve the team members for a specific neighbourhood.",
        parameters: force_and_neighbourhood_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: neighbourhood_team,
    })?;

    catalog.register(ToolSpec {
        name: "get_neighbourhood_events",
        description: "Retrieve events scheduled for a specific neighbourhood.",
        parameters: force_and_neighbourhood_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: neighbourhood_events,
    })?;

    catalog.register(ToolSpec {
        name: "get_neighbourhood_priorities",
        description: "Retrieve policing priorities for a specific neighbourhood.",
        parameters: force_and_neighbourhood_params(),
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: neighbourhood_priorities,
    })?;

    catalog.register(ToolSpec {
        name: "locate_neighbourhood",
        description: "Find the neighbourhood policing team for a given latitude and longitude.",
        parameters: vec![
            ParamDef::required("lat", ParamType::Float, "Latitude of the location."),
            ParamDef::required("lng", ParamType::Float, "Longitude of the location."),
        ],
        shape: ReturnShape::Record,
        extract: Extract::Verbatim,
        plan: locate_neighbourhood,
    })?;

    Ok(())
}

fn force_and_neighbourhood_params() -> Vec<ParamDef> {
    vec![
        ParamDef::required("force_id", ParamType::String, "The unique identifier for the force."),
        ParamDef::required(
            "neighbourhood_id",
            ParamType::String,
            "The unique identifier for the neighbourhood.",
        ),
    ]
}

fn neighbourhood_path(args: &Map<String, Value>, suffix: &str) -> Result<Plan> {
    let force_id = req_str(args, "force_id")?;
    let neighbourhood_id = req_str(args, "neighbourhood_id")?;
    Ok(Plan::Call(RequestPlan::new(format!(
        "{}/{}{}",
        force_id, neighbourhood_id, suffix
    ))))
}

fn neighbourhoods(args: &Map<String, Value>) -> Result<Plan> {
    let force_id = req_str(args, "force_id")?;
    Ok(Plan::Call(RequestPlan::new(format!("{}/neighbourhoods", force_id))))
}

fn neighbourhood_details(args: &Map<String, Value>) -> Result<Plan> {
    neighbourhood_path(args, "")
}

fn neighbourhood_boundary(args: &Map<String, Value>) -> Result<Plan> {
    neighbourhood_path(args, "/boundary")
}

fn neighbourhood_team(args: &Map<String, Value>) -> Result<Plan> {
    neighbourhood_path(args, "/people")
}

fn neighbourhood_events(args: &Map<String, Value>) -> Result<Plan> {
    neighbourhood_path(args, "/events")
}

fn neighbourhood_priorities(args: &Map<String, Value>) -> Result<Plan> {
    neighbourhood_path(args, "/priorities")
}

/// Coordinate-to-query variant: both coordinates collapse into one `q` key.
fn locate_neighbourhood(args: &Map<String, Value>) -> Result<Plan> {
    let lat = req_number(args, "lat")?;
    let lng = req_number(args, "lng")?;
    let mut query = QueryParams::new();
    query.insert("q".to_string(), format!("{},{}", lat, lng));
    Ok(Plan::Call(RequestPlan::with_query("locate-neighbourhood", query)))
}
