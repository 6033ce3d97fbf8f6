//! Property valuation tools: avm_engine, web_property_scraper,
//! document_property_parser, kb_ingest_indexer, valuation_model_runner
//!
//! Stub implementations over fixed sample data; only the document parser
//! touches the filesystem.

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use regex::Regex;
use serde_json::{json, Value};
use std::fs;

use super::{now_iso, provider::ModuleToolProvider, round2};

pub const AVM_ENGINE: &str = "avm_engine";
pub const WEB_PROPERTY_SCRAPER: &str = "web_property_scraper";
pub const DOCUMENT_PROPERTY_PARSER: &str = "document_property_parser";
pub const KB_INGEST_INDEXER: &str = "kb_ingest_indexer";
pub const VALUATION_MODEL_RUNNER: &str = "valuation_model_runner";

/// Amenity keywords recognized by the document parser
const AMENITIES: [&str; 5] = ["garage", "pool", "garden", "balcony", "fireplace"];

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                AVM_ENGINE,
                "Automated valuation model: quick initial estimate from property features",
            )
            .with_parameter(
                ToolParameter::new(
                    "property_features",
                    "Property features (sqft, bedrooms, bathrooms)",
                    true,
                )
                .with_type(ParamType::Object),
            ),
        )
        .register(
            ToolDefinition::new(
                WEB_PROPERTY_SCRAPER,
                "Scrape web listings and normalize the main fields of the property and comparables",
            )
            .with_parameter(ToolParameter::new("query", "Search query", true))
            .with_parameter(ToolParameter::new("location", "Target location", true))
            .with_parameter(
                ToolParameter::new("max_results", "Result cap", false)
                    .with_type(ParamType::Integer)
                    .with_default(50),
            )
            .with_parameter(
                ToolParameter::new("radius_km", "Search radius in km", false)
                    .with_type(ParamType::Number)
                    .with_default(3.0),
            ),
        )
        .register(
            ToolDefinition::new(
                DOCUMENT_PROPERTY_PARSER,
                "Extract structured property attributes from a text document (listing/inspection)",
            )
            .with_parameter(ToolParameter::new("file_path", "Path to the document", true))
            .with_parameter(ToolParameter::new("doc_type", "Document type hint", false)),
        )
        .register(
            ToolDefinition::new(
                KB_INGEST_INDEXER,
                "Ingest and index valuation documents/datasets into a knowledge collection",
            )
            .with_parameter(
                ToolParameter::new("paths", "Paths of documents to ingest", true)
                    .with_type(ParamType::Array),
            )
            .with_parameter(ToolParameter::new("collection", "Target collection name", true))
            .with_parameter(
                ToolParameter::new("recreate", "Recreate the collection first", false)
                    .with_type(ParamType::Boolean)
                    .with_default(false),
            ),
        )
        .register(
            ToolDefinition::new(
                VALUATION_MODEL_RUNNER,
                "Run a trained valuation model over a feature record",
            )
            .with_parameter(ToolParameter::new("model_name", "Model identifier", true))
            .with_parameter(
                ToolParameter::new("features", "Feature record", true).with_type(ParamType::Object),
            )
            .with_parameter(ToolParameter::new("version", "Model version", false)),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("valuation", "Property Valuation Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        AVM_ENGINE => execute_avm_engine(call),
        WEB_PROPERTY_SCRAPER => execute_web_property_scraper(call),
        DOCUMENT_PROPERTY_PARSER => execute_document_property_parser(call),
        KB_INGEST_INDEXER => execute_kb_ingest_indexer(call),
        VALUATION_MODEL_RUNNER => execute_valuation_model_runner(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

pub fn execute_avm_engine(call: &ToolCall) -> ToolResult {
    let features = match call.require_object("property_features") {
        Ok(f) => f,
        Err(e) => return ToolResult::failure(AVM_ENGINE, ToolError::invalid_argument(e)),
    };

    let sqft = features.get("sqft").and_then(Value::as_f64).unwrap_or(1000.0);
    let bedrooms = features.get("bedrooms").and_then(Value::as_f64).unwrap_or(2.0);
    let bathrooms = features.get("bathrooms").and_then(Value::as_f64).unwrap_or(1.0);
    let estimated_value = sqft * 200.0 + bedrooms * 10_000.0 + bathrooms * 5_000.0;

    ToolResult::success(
        AVM_ENGINE,
        json!({
            "estimated_value": estimated_value,
            "features_used": {
                "sqft": sqft,
                "bedrooms": bedrooms,
                "bathrooms": bathrooms,
            },
        }),
    )
}

pub fn execute_web_property_scraper(call: &ToolCall) -> ToolResult {
    let query = match call.require_string("query") {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(WEB_PROPERTY_SCRAPER, ToolError::invalid_argument(e)),
    };
    let location = match call.require_string("location") {
        Ok(l) => l,
        Err(e) => return ToolResult::failure(WEB_PROPERTY_SCRAPER, ToolError::invalid_argument(e)),
    };
    let max_results = call.get_i64("max_results").unwrap_or(50).max(0) as usize;
    let radius_km = call.get_f64("radius_km").unwrap_or(3.0);

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let sample = [
        json!({
            "address": format!("123 Sample St, {}", location),
            "list_price": 460_000,
            "sqft": 2200,
            "bedrooms": 3,
            "bathrooms": 2.5,
            "lot_size": 0.22,
            "year_built": 2012,
            "amenities": ["garage", "garden"],
            "source": "web",
            "date": today,
        }),
        json!({
            "address": format!("456 Example Ave, {}", location),
            "list_price": 485_000,
            "sqft": 2400,
            "bedrooms": 4,
            "bathrooms": 3,
            "lot_size": 0.30,
            "year_built": 2015,
            "amenities": ["garage"],
            "source": "web",
            "date": today,
        }),
    ];

    let results: Vec<Value> = sample
        .iter()
        .take(max_results)
        .map(|item| {
            let mut listing = item.clone();
            let ppsf = match (
                item.get("list_price").and_then(Value::as_f64),
                item.get("sqft").and_then(Value::as_f64),
            ) {
                (Some(price), Some(sqft)) if sqft > 0.0 => json!(round2(price / sqft)),
                _ => Value::Null,
            };
            if let Some(map) = listing.as_object_mut() {
                map.insert("price_per_sqft".to_string(), ppsf);
            }
            listing
        })
        .collect();

    ToolResult::success(
        WEB_PROPERTY_SCRAPER,
        json!({
            "query": query,
            "location": location,
            "radius_km": radius_km,
            "results": results,
            "normalized": true,
            "collected_at": now_iso(),
        }),
    )
}

pub fn execute_document_property_parser(call: &ToolCall) -> ToolResult {
    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => {
            return ToolResult::failure(DOCUMENT_PROPERTY_PARSER, ToolError::invalid_argument(e));
        }
    };
    let doc_type = call.get_string("doc_type");

    let content = match fs::read_to_string(file_path) {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(
                DOCUMENT_PROPERTY_PARSER,
                ToolError::not_found(file_path).with_details(e.to_string()),
            );
        }
    };

    let mut extracted = serde_json::Map::new();
    let mut matched_lines: Vec<String> = Vec::new();

    // (field, pattern, capture group holding the value)
    let patterns: [(&str, &str, usize); 6] = [
        ("address", r"(?im)address\s*[:\-]?\s*(.+)$", 1),
        ("sqft", r"(?im)(sqft|square\s*feet)\s*[:\-]?\s*(\d{3,6})", 2),
        ("bedrooms", r"(?im)bed(room)?s?\s*[:\-]?\s*(\d{1,2})", 2),
        ("bathrooms", r"(?im)bath(room)?s?\s*[:\-]?\s*(\d{1,2}(?:\.\d)?)", 2),
        ("lot_size", r"(?im)lot\s*size\s*[:\-]?\s*(\d{1,2}(?:\.\d{1,2})?)", 1),
        ("year_built", r"(?im)year\s*built\s*[:\-]?\s*(\d{4})", 1),
    ];

    for (field, pattern, group) in patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                return ToolResult::failure(
                    DOCUMENT_PROPERTY_PARSER,
                    ToolError::execution_failed(format!("Invalid pattern for {}: {}", field, e)),
                );
            }
        };
        let value = match re.captures(&content) {
            Some(caps) => {
                if let Some(whole) = caps.get(0) {
                    matched_lines.push(whole.as_str().to_string());
                }
                let raw = caps.get(group).map(|m| m.as_str().trim()).unwrap_or("");
                match field {
                    "sqft" | "year_built" => raw
                        .parse::<i64>()
                        .map(Value::from)
                        .unwrap_or_else(|_| Value::from(raw)),
                    "bedrooms" => raw
                        .parse::<f64>()
                        .map(|n| Value::from(n as i64))
                        .unwrap_or_else(|_| Value::from(raw)),
                    "bathrooms" | "lot_size" => raw
                        .parse::<f64>()
                        .map(Value::from)
                        .unwrap_or_else(|_| Value::from(raw)),
                    _ => Value::from(raw),
                }
            }
            None => Value::Null,
        };
        extracted.insert(field.to_string(), value);
    }

    let lowered = content.to_lowercase();
    let amenities: Vec<&str> = AMENITIES
        .iter()
        .copied()
        .filter(|a| lowered.contains(a))
        .collect();
    extracted.insert("amenities".to_string(), json!(amenities));

    matched_lines.truncate(5);
    ToolResult::success(
        DOCUMENT_PROPERTY_PARSER,
        json!({
            "file_path": file_path,
            "doc_type": doc_type,
            "extracted": extracted,
            "matched_examples": matched_lines,
            "parsed_at": now_iso(),
        }),
    )
}

pub fn execute_kb_ingest_indexer(call: &ToolCall) -> ToolResult {
    let paths = match call.require_array("paths") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(KB_INGEST_INDEXER, ToolError::invalid_argument(e)),
    };
    let collection = match call.require_string("collection") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(KB_INGEST_INDEXER, ToolError::invalid_argument(e)),
    };
    let recreate = call.get_bool("recreate").unwrap_or(false);

    ToolResult::success(
        KB_INGEST_INDEXER,
        json!({
            "collection": collection,
            "ingested_items": paths.len(),
            "recreated": recreate,
            "indexed_at": now_iso(),
        }),
    )
}

pub fn execute_valuation_model_runner(call: &ToolCall) -> ToolResult {
    let model_name = match call.require_string("model_name") {
        Ok(m) => m,
        Err(e) => {
            return ToolResult::failure(VALUATION_MODEL_RUNNER, ToolError::invalid_argument(e));
        }
    };
    let features = match call.require_object("features") {
        Ok(f) => f,
        Err(e) => {
            return ToolResult::failure(VALUATION_MODEL_RUNNER, ToolError::invalid_argument(e));
        }
    };
    let version = call.get_string("version").unwrap_or("v1.0");

    ToolResult::success(
        VALUATION_MODEL_RUNNER,
        json!({
            "model_name": model_name,
            "features": features,
            "predicted_value": 250_000,
            "confidence": 0.87,
            "version": version,
            "run_at": now_iso(),
            "explanations": {"ppsf_adjustment": 0, "comparables_delta": 0},
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_avm_engine_formula() {
        let call = ToolCall::new(AVM_ENGINE)
            .with_arg("property_features", json!({"sqft": 2000, "bedrooms": 3, "bathrooms": 2}));
        let result = execute_avm_engine(&call);
        // 2000*200 + 3*10000 + 2*5000
        assert_eq!(
            result.output().and_then(|o| o["estimated_value"].as_f64()),
            Some(440_000.0)
        );
    }

    #[test]
    fn test_avm_engine_defaults_for_missing_features() {
        let call = ToolCall::new(AVM_ENGINE).with_arg("property_features", json!({}));
        let result = execute_avm_engine(&call);
        // 1000*200 + 2*10000 + 1*5000
        assert_eq!(
            result.output().and_then(|o| o["estimated_value"].as_f64()),
            Some(225_000.0)
        );
    }

    #[test]
    fn test_scraper_normalizes_price_per_sqft() {
        let call = ToolCall::new(WEB_PROPERTY_SCRAPER)
            .with_arg("query", "3 bed house")
            .with_arg("location", "Rabat");
        let result = execute_web_property_scraper(&call);
        let output = result.output().unwrap();

        let results = output["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["price_per_sqft"].as_f64(), Some(209.09));
        assert!(results[0]["address"].as_str().unwrap().contains("Rabat"));
    }

    #[test]
    fn test_document_parser_extracts_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Address: 12 Palm Street").unwrap();
        writeln!(file, "Sqft: 2200").unwrap();
        writeln!(file, "Bedrooms: 3").unwrap();
        writeln!(file, "Bathrooms: 2.5").unwrap();
        writeln!(file, "Year built: 2012").unwrap();
        writeln!(file, "Has a garage and a pool.").unwrap();

        let call = ToolCall::new(DOCUMENT_PROPERTY_PARSER)
            .with_arg("file_path", file.path().to_str().unwrap());
        let result = execute_document_property_parser(&call);
        let extracted = &result.output().unwrap()["extracted"];

        assert_eq!(extracted["address"].as_str(), Some("12 Palm Street"));
        assert_eq!(extracted["sqft"].as_i64(), Some(2200));
        assert_eq!(extracted["bedrooms"].as_i64(), Some(3));
        assert_eq!(extracted["bathrooms"].as_f64(), Some(2.5));
        assert_eq!(extracted["year_built"].as_i64(), Some(2012));
        assert_eq!(extracted["amenities"], json!(["garage", "pool"]));
    }

    #[test]
    fn test_document_parser_unreadable_file() {
        let call = ToolCall::new(DOCUMENT_PROPERTY_PARSER)
            .with_arg("file_path", "/nonexistent/listing.txt");
        let result = execute_document_property_parser(&call);
        assert!(!result.is_success());
        assert_eq!(result.error().map(|e| e.code.as_str()), Some("NOT_FOUND"));
    }

    #[test]
    fn test_kb_ingest_counts_paths() {
        let call = ToolCall::new(KB_INGEST_INDEXER)
            .with_arg("paths", json!(["a.txt", "b.txt"]))
            .with_arg("collection", "valuation_docs");
        let result = execute_kb_ingest_indexer(&call);
        let output = result.output().unwrap();
        assert_eq!(output["ingested_items"].as_u64(), Some(2));
        assert_eq!(output["collection"].as_str(), Some("valuation_docs"));
    }

    #[test]
    fn test_model_runner_fixed_prediction() {
        let call = ToolCall::new(VALUATION_MODEL_RUNNER)
            .with_arg("model_name", "automl-v2")
            .with_arg("features", json!({"sqft": 2000}));
        let result = execute_valuation_model_runner(&call);
        let output = result.output().unwrap();
        assert_eq!(output["predicted_value"].as_i64(), Some(250_000));
        assert_eq!(output["confidence"].as_f64(), Some(0.87));
        assert_eq!(output["version"].as_str(), Some("v1.0"));
    }
}
