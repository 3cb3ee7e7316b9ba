//! Crime data tools: street-level crimes and outcomes, unmapped crimes,
//! categories, the last-updated marker, and per-crime outcome lookup.

use serde_json::{Map, Value};

use crate::catalog::{
    Extract, ParamDef, ParamType, Plan, RequestPlan, ReturnShape, ToolCatalog, ToolSpec,
};
use crate::tools::{date_query, opt_str, req_str, resolve_area};
use crate::types::Result;

pub fn register(catalog: &mut ToolCatalog) -> Result<()> {
    catalog.register(ToolSpec {
        name: "get_street_level_crimes",
        description: "Retrieve street-level crimes by lat/lng or custom polygon area.",
        parameters: vec![
            ParamDef::optional("lat", ParamType::Float, "Latitude of the requested crime area."),
            ParamDef::optional("lng", ParamType::Float, "Longitude of the requested crime area."),
            ParamDef::optional(
                "poly",
                ParamType::String,
                "The lat/lng pairs defining the boundary of the custom area.",
            ),
            ParamDef::optional("date", ParamType::String, "Limit results to a specific month (YYYY-MM)."),
            ParamDef::optional("category", ParamType::String, "The crime category.")
                .with_default(Value::String("all-crime".to_string())),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: street_level_crimes,
    })?;

    catalog.register(ToolSpec {
        name: "get_street_level_outcomes",
        description: "Retrieve outcomes by lat/lng, custom polygon, or location ID.",
        parameters: vec![
            ParamDef::optional("lat", ParamType::Float, "Latitude of the requested area."),
            ParamDef::optional("lng", ParamType::Float, "Longitude of the requested area."),
            ParamDef::optional(
                "poly",
                ParamType::String,
                "The lat/lng pairs defining the boundary of the custom area.",
            ),
            ParamDef::optional("location_id", ParamType::Int, "The ID of the location."),
            ParamDef::optional("date", ParamType::String, "Limit results to a specific month (YYYY-MM)."),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: street_level_outcomes,
    })?;

    catalog.register(ToolSpec {
        name: "get_crimes_at_location",
        description: "Retrieve crimes at a specific location by ID or nearest to lat/lng.",
        parameters: vec![
            ParamDef::optional("lat", ParamType::Float, "Latitude of the requested crime area."),
            ParamDef::optional("lng", ParamType::Float, "Longitude of the requested crime area."),
            ParamDef::optional("location_id", ParamType::Int, "The ID of the location."),
            ParamDef::optional("date", ParamType::String, "Limit results to a specific month (YYYY-MM)."),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: crimes_at_location,
    })?;

    catalog.register(ToolSpec {
        name: "get_crimes_no_location",
        description: "Retrieve crimes that could not be mapped to a location.",
        parameters: vec![
            ParamDef::required("category", ParamType::String, "The category of the crimes."),
            ParamDef::required("force", ParamType::String, "Specific police force."),
            ParamDef::optional("date", ParamType::String, "Limit results to a specific month (YYYY-MM)."),
        ],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: crimes_no_location,
    })?;

    catalog.register(ToolSpec {
        name: "get_crime_categories",
        description: "Retrieve valid crime categories for a given date.",
        parameters: vec![ParamDef::optional(
            "date",
            ParamType::String,
            "Specific month (YYYY-MM).",
        )],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: crime_categories,
    })?;

    catalog.register(ToolSpec {
        name: "get_last_updated",
        description: "Retrieve the date when crime data was last updated.",
        parameters: vec![],
        shape: ReturnShape::Scalar,
        extract: Extract::Field("date"),
        plan: last_updated,
    })?;

    catalog.register(ToolSpec {
        name: "get_outcomes_for_crime",
        description: "Retrieve outcomes for a specific crime by persistent ID.",
        parameters: vec![ParamDef::required(
            "persistent_id",
            ParamType::String,
            "The 64-character unique identifier for the crime.",
        )],
        shape: ReturnShape::Record,
        extract: Extract::Verbatim,
        plan: outcomes_for_crime,
    })?;

    Ok(())
}

/// Area family, point or polygon only. The category (defaulted to
/// `all-crime`) is a path parameter, not a query key.
fn street_level_crimes(args: &Map<String, Value>) -> Result<Plan> {
    let Some(area) = resolve_area(args, false, true) else {
        return Ok(Plan::Skip);
    };
    let mut query = date_query(args);
    area.apply(&mut query);
    let category = opt_str(args, "category").unwrap_or("all-crime");
    Ok(Plan::Call(RequestPlan::with_query(
        format!("crimes-street/{}", category),
        query,
    )))
}

/// Area family with the full priority chain: location id > lat/lng > polygon.
fn street_level_outcomes(args: &Map<String, Value>) -> Result<Plan> {
    let Some(area) = resolve_area(args, true, true) else {
        return Ok(Plan::Skip);
    };
    let mut query = date_query(args);
    area.apply(&mut query);
    Ok(Plan::Call(RequestPlan::with_query("outcomes-at-location", query)))
}

/// Area family, location id or lat/lng only (no polygon variant upstream).
fn crimes_at_location(args: &Map<String, Value>) -> Result<Plan> {
    let Some(area) = resolve_area(args, true, false) else {
        return Ok(Plan::Skip);
    };
    let mut query = date_query(args);
    area.apply(&mut query);
    Ok(Plan::Call(RequestPlan::with_query("crimes-at-location", query)))
}

fn crimes_no_location(args: &Map<String, Value>) -> Result<Plan> {
    let mut query = date_query(args);
    query.insert("category".to_string(), req_str(args, "category")?.to_string());
    query.insert("force".to_string(), req_str(args, "force")?.to_string());
    Ok(Plan::Call(RequestPlan::with_query("crimes-no-location", query)))
}

fn crime_categories(args: &Map<String, Value>) -> Result<Plan> {
    Ok(Plan::Call(RequestPlan::with_query(
        "crime-categories",
        date_query(args),
    )))
}

fn last_updated(_args: &Map<String, Value>) -> Result<Plan> {
    Ok(Plan::Call(RequestPlan::new("crime-last-updated")))
}

fn outcomes_for_crime(args: &Map<String, Value>) -> Result<Plan> {
    let persistent_id = req_str(args, "persistent_id")?;
    Ok(Plan::Call(RequestPlan::new(format!(
        "outcomes-for-crime/{}",
        persistent_id
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    fn expect_call(plan: Plan) -> RequestPlan {
        match plan {
            Plan::Call(p) => p,
            Plan::Skip => panic!("expected a call, got skip"),
        }
    }

    #[test]
    fn street_crimes_category_lands_in_path() {
        let plan = street_level_crimes(&args(serde_json::json!({
            "lat": 52.629729, "lng": -1.131592, "category": "burglary",
        })))
        .unwrap();
        let plan = expect_call(plan);
        assert_eq!(plan.endpoint, "crimes-street/burglary");
        assert_eq!(plan.query.get("lat").map(String::as_str), Some("52.629729"));
        assert_eq!(plan.query.get("lng").map(String::as_str), Some("-1.131592"));
        assert!(!plan.query.contains_key("category"));
    }

    #[test]
    fn street_crimes_defaults_to_all_crime() {
        // invoke() fills the default; the plan falls back the same way when
        // called bare
        let plan = street_level_crimes(&args(serde_json::json!({"poly": "1,2:3,4:5,6"}))).unwrap();
        let plan = expect_call(plan);
        assert_eq!(plan.endpoint, "crimes-street/all-crime");
        assert_eq!(plan.query.get("poly").map(String::as_str), Some("1,2:3,4:5,6"));
    }

    #[test]
    fn street_crimes_without_area_skips() {
        let plan = street_level_crimes(&args(serde_json::json!({"date": "2024-01"}))).unwrap();
        assert_eq!(plan, Plan::Skip);
    }

    #[test]
    fn street_crimes_ignores_location_id_family() {
        // This entry has no location_id parameter; nothing else supplied
        // means skip even if a stray key slipped past validation.
        let plan = street_level_crimes(&args(serde_json::json!({}))).unwrap();
        assert_eq!(plan, Plan::Skip);
    }

    #[test]
    fn outcomes_location_id_wins_over_coordinates() {
        let plan = street_level_outcomes(&args(serde_json::json!({
            "location_id": 883407, "lat": 52.6, "lng": -1.1, "date": "2023-05",
        })))
        .unwrap();
        let plan = expect_call(plan);
        assert_eq!(plan.endpoint, "outcomes-at-location");
        assert_eq!(plan.query.get("location_id").map(String::as_str), Some("883407"));
        assert_eq!(plan.query.get("date").map(String::as_str), Some("2023-05"));
        assert!(!plan.query.contains_key("lat"));
        assert!(!plan.query.contains_key("lng"));
    }

    #[test]
    fn crimes_at_location_has_no_polygon_branch() {
        let plan = crimes_at_location(&args(serde_json::json!({"poly": "1,2:3,4"}))).unwrap();
        assert_eq!(plan, Plan::Skip);
    }

    #[test]
    fn crimes_no_location_is_a_flat_filter() {
        let plan = crimes_no_location(&args(serde_json::json!({
            "category": "all-crime", "force": "leicestershire", "date": "2023-03",
        })))
        .unwrap();
        let plan = expect_call(plan);
        assert_eq!(plan.endpoint, "crimes-no-location");
        assert_eq!(plan.query.get("category").map(String::as_str), Some("all-crime"));
        assert_eq!(plan.query.get("force").map(String::as_str), Some("leicestershire"));
        assert_eq!(plan.query.get("date").map(String::as_str), Some("2023-03"));
    }

    #[test]
    fn crime_categories_passes_date_through() {
        let plan = crime_categories(&args(serde_json::json!({"date": "2023-01"}))).unwrap();
        let plan = expect_call(plan);
        assert_eq!(plan.endpoint, "crime-categories");
        assert_eq!(plan.query.get("date").map(String::as_str), Some("2023-01"));
    }

    #[test]
    fn last_updated_takes_no_query() {
        let plan = expect_call(last_updated(&args(serde_json::json!({}))).unwrap());
        assert_eq!(plan.endpoint, "crime-last-updated");
        assert!(plan.query.is_empty());
    }

    #[test]
    fn outcomes_for_crime_interpolates_persistent_id() {
        let plan = outcomes_for_crime(&args(serde_json::json!({
            "persistent_id": "598d33f31d4a70c65c4adf8e8181e01e4cb3a101851a4c3802359f9fd2b555b7",
        })))
        .unwrap();
        let plan = expect_call(plan);
        assert_eq!(
            plan.endpoint,
            "outcomes-for-crime/598d33f31d4a70c65c4adf8e8181e01e4cb3a101851a4c3802359f9fd2b555b7"
        );
        assert!(plan.query.is_empty());
    }
}
