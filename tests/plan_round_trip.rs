//! Round-trip check: for every tool, rendering the planned request to a full
//! URL and re-parsing the query string reproduces the same key/value set.
//! No silent drops or renames, except the documented `force_id` → `force`
//! rename in the two force-scoped stop-search entries.

use police_api_tools::catalog::Plan;
use police_api_tools::gateway::QueryParams;
use police_api_tools::tools::builtin_catalog;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

/// Representative arguments that drive every entry down its call path.
fn sample_args(tool: &str) -> Value {
    match tool {
        "get_street_level_crimes" => json!({
            "lat": 52.629729, "lng": -1.131592, "date": "2024-01", "category": "all-crime",
        }),
        "get_street_level_outcomes" => json!({"location_id": 883407, "date": "2024-01"}),
        "get_crimes_at_location" => json!({"lat": 52.629729, "lng": -1.131592}),
        "get_crimes_no_location" => json!({
            "category": "burglary", "force": "leicestershire", "date": "2024-01",
        }),
        "get_crime_categories" => json!({"date": "2023-01"}),
        "get_last_updated" => json!({}),
        "get_outcomes_for_crime" => json!({"persistent_id": "abc123"}),
        "get_list_of_forces" => json!({}),
        "get_force_details" | "get_senior_officers" | "get_neighbourhoods" => {
            json!({"force_id": "leicestershire"})
        }
        "get_neighbourhood_details"
        | "get_neighbourhood_boundary"
        | "get_neighbourhood_team"
        | "get_neighbourhood_events"
        | "get_neighbourhood_priorities" => {
            json!({"force_id": "leicestershire", "neighbourhood_id": "NC04"})
        }
        "locate_neighbourhood" => json!({"lat": 51.500617, "lng": -0.124629}),
        "get_stop_searches_by_area" => json!({
            "poly": "52.268,0.543:52.794,0.238:52.130,0.478", "date": "2023-09",
        }),
        "get_stop_searches_by_location" => json!({"location_id": 883407, "date": "2023-09"}),
        "get_stop_searches_no_location" | "get_stop_searches_by_force" => {
            json!({"force_id": "metropolitan", "date": "2023-09"})
        }
        other => panic!("no sample args for {}", other),
    }
}

fn to_map(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

#[test]
fn every_entry_survives_url_round_trip() {
    let catalog = builtin_catalog().unwrap();
    assert_eq!(catalog.len(), 21);

    for spec in catalog.list_entries() {
        let args = to_map(sample_args(spec.name));
        let plan = (spec.plan)(&args).unwrap();
        let plan = match plan {
            Plan::Call(p) => p,
            Plan::Skip => panic!("{}: sample args should produce a call", spec.name),
        };

        // Render exactly the way the gateway does: base/endpoint + encoded
        // query, then parse back.
        let url = reqwest::Url::parse_with_params(
            &format!("https://data.police.uk/api/{}", plan.endpoint),
            plan.query.iter(),
        )
        .unwrap();

        let reparsed: QueryParams = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(reparsed, plan.query, "query drift for {}", spec.name);
        assert!(
            url.path().ends_with(&plan.endpoint),
            "path drift for {}: {}",
            spec.name,
            url.path()
        );
    }
}

#[test]
fn force_scoped_stop_searches_rename_force_id() {
    let catalog = builtin_catalog().unwrap();

    for name in ["get_stop_searches_no_location", "get_stop_searches_by_force"] {
        let spec = catalog.get(name).unwrap();
        let args = to_map(sample_args(name));
        match (spec.plan)(&args).unwrap() {
            Plan::Call(plan) => {
                assert_eq!(plan.query.get("force").map(String::as_str), Some("metropolitan"));
                assert!(!plan.query.contains_key("force_id"), "{} leaked force_id", name);
            }
            Plan::Skip => panic!("{}: expected a call", name),
        }
    }
}

#[test]
fn all_other_entries_pass_argument_keys_verbatim() {
    // Flat-filter entries must not rename anything: each supplied filter key
    // appears in the query under its own name.
    let catalog = builtin_catalog().unwrap();

    let spec = catalog.get("get_crimes_no_location").unwrap();
    let args = to_map(sample_args("get_crimes_no_location"));
    match (spec.plan)(&args).unwrap() {
        Plan::Call(plan) => {
            for key in ["category", "force", "date"] {
                assert!(plan.query.contains_key(key), "missing key {}", key);
            }
        }
        Plan::Skip => panic!("expected a call"),
    }
}
