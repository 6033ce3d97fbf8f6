//! Property search tools: search_properties, generate_user_profile,
//! recommend_properties

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use serde_json::{json, Value};

use super::{now_iso, provider::ModuleToolProvider};

pub const SEARCH_PROPERTIES: &str = "search_properties";
pub const GENERATE_USER_PROFILE: &str = "generate_user_profile";
pub const RECOMMEND_PROPERTIES: &str = "recommend_properties";

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                SEARCH_PROPERTIES,
                "Search candidate property listings from user criteria",
            )
            .with_parameter(ToolParameter::new("location", "Target city or district", true))
            .with_parameter(
                ToolParameter::new("property_type", "Property type filter", false)
                    .with_default("Appartement"),
            )
            .with_parameter(
                ToolParameter::new("max_price", "Upper price bound", false)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("min_area", "Lower area bound in m2", false)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("max_results", "Result cap", false)
                    .with_type(ParamType::Integer)
                    .with_default(10),
            ),
        )
        .register(
            ToolDefinition::new(
                GENERATE_USER_PROFILE,
                "Build a user profile vector from explicit preferences",
            )
            .with_parameter(
                ToolParameter::new("preferences", "Explicit preferences (budget, type, location)", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(
                ToolParameter::new("interactions", "Past interaction records", false)
                    .with_type(ParamType::Array),
            ),
        )
        .register(
            ToolDefinition::new(
                RECOMMEND_PROPERTIES,
                "Rank candidate properties against a user profile",
            )
            .with_parameter(
                ToolParameter::new("candidate_properties", "Candidate listings", true)
                    .with_type(ParamType::Array),
            )
            .with_parameter(
                ToolParameter::new("user_profile", "Profile from generate_user_profile", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(
                ToolParameter::new("top_k", "Number of recommendations", false)
                    .with_type(ParamType::Integer)
                    .with_default(3),
            ),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("search", "Property Search Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        SEARCH_PROPERTIES => execute_search_properties(call),
        GENERATE_USER_PROFILE => execute_generate_user_profile(call),
        RECOMMEND_PROPERTIES => execute_recommend_properties(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

/// Fixed candidate listings for the given location
fn sample_properties(location: &str) -> Vec<Value> {
    vec![
        json!({"id": 1, "address": format!("Appartement {} - Bourgogne", location), "price": 1_800_000, "area": 120, "type": "Appartement"}),
        json!({"id": 2, "address": format!("Appartement {} - Maarif", location), "price": 1_147_500, "area": 85, "type": "Appartement"}),
        json!({"id": 3, "address": format!("Studio {} - Gauthier", location), "price": 800_000, "area": 50, "type": "Studio"}),
    ]
}

pub fn execute_search_properties(call: &ToolCall) -> ToolResult {
    let location = match call.require_string("location") {
        Ok(l) => l,
        Err(e) => return ToolResult::failure(SEARCH_PROPERTIES, ToolError::invalid_argument(e)),
    };
    let property_type = call.get_string("property_type");
    let max_price = call.get_f64("max_price");
    let min_area = call.get_f64("min_area");
    let max_results = call.get_i64("max_results").unwrap_or(10).max(0) as usize;

    let results: Vec<Value> = sample_properties(location)
        .into_iter()
        .filter(|p| {
            let price = p["price"].as_f64().unwrap_or(f64::INFINITY);
            let area = p["area"].as_f64().unwrap_or(0.0);
            max_price.is_none_or(|max| price <= max)
                && min_area.is_none_or(|min| area >= min)
                && property_type.is_none_or(|t| p["type"].as_str() == Some(t))
        })
        .take(max_results)
        .collect();

    ToolResult::success(
        SEARCH_PROPERTIES,
        json!({
            "location": location,
            "criteria": {
                "property_type": property_type,
                "max_price": max_price,
                "min_area": min_area,
            },
            "results": results,
            "searched_at": now_iso(),
        }),
    )
}

pub fn execute_generate_user_profile(call: &ToolCall) -> ToolResult {
    let preferences = match call.require_object("preferences") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GENERATE_USER_PROFILE, ToolError::invalid_argument(e)),
    };
    let interactions = call.get_array("interactions").cloned().unwrap_or_default();

    let budget = preferences
        .get("budget")
        .cloned()
        .unwrap_or_else(|| json!(1_000_000));
    let preferred_type = preferences
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("Appartement");
    let preferred_location = preferences
        .get("location")
        .and_then(Value::as_str)
        .unwrap_or("Casablanca");

    ToolResult::success(
        GENERATE_USER_PROFILE,
        json!({
            "budget": budget,
            "preferred_type": preferred_type,
            "preferred_location": preferred_location,
            "interactions": interactions,
            "generated_at": now_iso(),
        }),
    )
}

pub fn execute_recommend_properties(call: &ToolCall) -> ToolResult {
    let candidates = match call.require_array("candidate_properties") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(RECOMMEND_PROPERTIES, ToolError::invalid_argument(e)),
    };
    let profile = match call.require_object("user_profile") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(RECOMMEND_PROPERTIES, ToolError::invalid_argument(e)),
    };
    let top_k = call.get_i64("top_k").unwrap_or(3).max(0) as usize;

    let budget = profile
        .get("budget")
        .and_then(Value::as_f64)
        .unwrap_or(f64::INFINITY);
    let preferred_type = profile.get("preferred_type").and_then(Value::as_str);
    let preferred_location = profile.get("preferred_location").and_then(Value::as_str);

    let mut filtered: Vec<Value> = candidates
        .iter()
        .filter(|p| {
            let price = p["price"].as_f64().unwrap_or(f64::INFINITY);
            let address = p["address"].as_str().unwrap_or("");
            price <= budget
                && preferred_type.is_none_or(|t| p["type"].as_str() == Some(t))
                && preferred_location.is_none_or(|l| address.contains(l))
        })
        .cloned()
        .collect();

    // Largest area first
    filtered.sort_by(|a, b| {
        let area_a = a["area"].as_f64().unwrap_or(0.0);
        let area_b = b["area"].as_f64().unwrap_or(0.0);
        area_b.partial_cmp(&area_a).unwrap_or(std::cmp::Ordering::Equal)
    });
    filtered.truncate(top_k);

    ToolResult::success(
        RECOMMEND_PROPERTIES,
        json!({
            "recommended": filtered,
            "user_profile": profile,
            "recommended_at": now_iso(),
        }),
    )
}
