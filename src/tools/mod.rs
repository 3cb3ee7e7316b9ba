//! The 21 built-in tools, grouped by upstream domain.
//!
//! Each entry is metadata plus a pure plan function; the shared selection
//! helpers here implement the three families the entries draw from:
//! area priority (location id > lat/lng > polygon), identifier paths, and
//! flat filters.
//!
//! A parameter counts as supplied iff its key is present and non-null. In
//! particular `location_id = 0` and coordinates on the equator or prime
//! meridian are valid supplied values.

pub mod crimes;
pub mod forces;
pub mod neighbourhoods;
pub mod stops;

use serde_json::{Map, Value};

use crate::catalog::ToolCatalog;
use crate::gateway::QueryParams;
use crate::types::{Error, Result};

/// Build the full registry. Called once at startup; the result is read-only.
pub fn builtin_catalog() -> Result<ToolCatalog> {
    let mut catalog = ToolCatalog::new();
    crimes::register(&mut catalog)?;
    forces::register(&mut catalog)?;
    neighbourhoods::register(&mut catalog)?;
    stops::register(&mut catalog)?;
    Ok(catalog)
}

// =============================================================================
// Shared helpers — used by all tool modules
// =============================================================================

/// Present-and-non-null lookup.
pub(crate) fn supplied<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|v| !v.is_null())
}

pub(crate) fn opt_str<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    supplied(args, key).and_then(|v| v.as_str())
}

/// Render a supplied numeric argument to its query-string form.
pub(crate) fn opt_number(args: &Map<String, Value>, key: &str) -> Option<String> {
    supplied(args, key)
        .and_then(|v| v.as_number())
        .map(|n| n.to_string())
}

/// Required string argument. Validation runs before planning, so a miss here
/// is a caller-contract violation surfaced as-is.
pub(crate) fn req_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    opt_str(args, key).ok_or_else(|| Error::validation(format!("Missing required parameter: {}", key)))
}

pub(crate) fn req_number(args: &Map<String, Value>, key: &str) -> Result<String> {
    opt_number(args, key)
        .ok_or_else(|| Error::validation(format!("Missing required parameter: {}", key)))
}

/// Query map holding only the optional `date` filter, when supplied.
pub(crate) fn date_query(args: &Map<String, Value>) -> QueryParams {
    let mut query = QueryParams::new();
    if let Some(date) = opt_str(args, "date") {
        query.insert("date".to_string(), date.to_string());
    }
    query
}

// =============================================================================
// Area selection
// =============================================================================

/// Resolved geographic selector for the area-family entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AreaQuery {
    Location(String),
    Point { lat: String, lng: String },
    Polygon(String),
}

impl AreaQuery {
    /// Write this selector into a query map.
    pub(crate) fn apply(&self, query: &mut QueryParams) {
        match self {
            AreaQuery::Location(id) => {
                query.insert("location_id".to_string(), id.clone());
            }
            AreaQuery::Point { lat, lng } => {
                query.insert("lat".to_string(), lat.clone());
                query.insert("lng".to_string(), lng.clone());
            }
            AreaQuery::Polygon(poly) => {
                query.insert("poly".to_string(), poly.clone());
            }
        }
    }
}

/// Priority resolution: location id (when the entry supports one) beats a
/// lat/lng pair beats a polygon (when supported). Lower-priority inputs are
/// ignored once a higher one is satisfied; `None` means the entry should
/// short-circuit to its fallback without any upstream call.
pub(crate) fn resolve_area(
    args: &Map<String, Value>,
    with_location: bool,
    with_polygon: bool,
) -> Option<AreaQuery> {
    if with_location {
        if let Some(id) = opt_number(args, "location_id") {
            return Some(AreaQuery::Location(id));
        }
    }
    if let (Some(lat), Some(lng)) = (opt_number(args, "lat"), opt_number(args, "lng")) {
        return Some(AreaQuery::Point { lat, lng });
    }
    if with_polygon {
        if let Some(poly) = opt_str(args, "poly") {
            return Some(AreaQuery::Polygon(poly.to_string()));
        }
    }
    None
}
