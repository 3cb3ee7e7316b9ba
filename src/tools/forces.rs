//! Police force tools: the force list, per-force details, senior officers.

use serde_json::{Map, Value};

use crate::catalog::{
    Extract, ParamDef, ParamType, Plan, RequestPlan, ReturnShape, ToolCatalog, ToolSpec,
};
use crate::tools::req_str;
use crate::types::Result;

pub fn register(catalog: &mut ToolCatalog) -> Result<()> {
    catalog.register(ToolSpec {
        name: "get_list_of_forces",
        description: "Retrieve a list of all police forces.",
        parameters: vec![],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: list_of_forces,
    })?;

    catalog.register(ToolSpec {
        name: "get_force_details",
        description: "Retrieve details for a specific police force.",
        parameters: vec![ParamDef::required(
            "force_id",
            ParamType::String,
            "The unique identifier for the force.",
        )],
        shape: ReturnShape::Record,
        extract: Extract::Verbatim,
        plan: force_details,
    })?;

    catalog.register(ToolSpec {
        name: "get_senior_officers",
        description: "Retrieve senior officers for a specific police force.",
        parameters: vec![ParamDef::required(
            "force_id",
            ParamType::String,
            "The unique identifier for the force.",
        )],
        shape: ReturnShape::List,
        extract: Extract::Verbatim,
        plan: senior_officers,
    })?;

    Ok(())
}

fn list_of_forces(_args: &Map<String, Value>) -> Result<Plan> {
    Ok(Plan::Call(RequestPlan::new("forces")))
}

fn force_details(args: &Map<String, Value>) -> Result<Plan> {
    let force_id = req_str(args, "force_id")?;
    Ok(Plan::Call(RequestPlan::new(format!("forces/{}", force_id))))
}

fn senior_officers(args: &Map<String, Value>) -> Result<Plan> {
    let force_id = req_str(args, "force_id")?;
    Ok(Plan::Call(RequestPlan::new(format!("forces/{}/people", force_id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn forces_list_is_bare() {
        match list_of_forces(&args(serde_json::json!({}))).unwrap() {
            Plan::Call(plan) => {
                assert_eq!(plan.endpoint, "forces");
                assert!(plan.query.is_empty());
            }
            Plan::Skip => panic!("expected a call"),
        }
    }

    #[test]
    fn force_id_is_a_path_parameter() {
        match force_details(&args(serde_json::json!({"force_id": "leicestershire"}))).unwrap() {
            Plan::Call(plan) => assert_eq!(plan.endpoint, "forces/leicestershire"),
            Plan::Skip => panic!("expected a call"),
        }
        match senior_officers(&args(serde_json::json!({"force_id": "leicestershire"}))).unwrap() {
            Plan::Call(plan) => assert_eq!(plan.endpoint, "forces/leicestershire/people"),
            Plan::Skip => panic!("expected a call"),
        }
    }

    #[test]
    fn missing_force_id_is_a_contract_violation() {
        assert!(force_details(&args(serde_json::json!({}))).is_err());
    }
}
