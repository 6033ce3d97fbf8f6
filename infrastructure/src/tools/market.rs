//! Market analysis tools: aggregate_market_data, analyze_trends,
//! forecast_market, generate_visual_reports

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use serde_json::{json, Value};

use super::{now_iso, provider::ModuleToolProvider, round2};

pub const AGGREGATE_MARKET_DATA: &str = "aggregate_market_data";
pub const ANALYZE_TRENDS: &str = "analyze_trends";
pub const FORECAST_MARKET: &str = "forecast_market";
pub const GENERATE_VISUAL_REPORTS: &str = "generate_visual_reports";

const MAX_ENTRIES: i64 = 1000;

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                AGGREGATE_MARKET_DATA,
                "Aggregate market data from datasets, public listings and history",
            )
            .with_parameter(
                ToolParameter::new("datasets", "Market data records", true)
                    .with_type(ParamType::Array),
            )
            .with_parameter(
                ToolParameter::new("max_entries", "Entry cap", false)
                    .with_type(ParamType::Integer)
                    .with_default(MAX_ENTRIES),
            ),
        )
        .register(
            ToolDefinition::new(
                ANALYZE_TRENDS,
                "Analyze market trends and price fluctuations",
            )
            .with_parameter(
                ToolParameter::new("market_data", "Aggregated market records", true)
                    .with_type(ParamType::Array),
            ),
        )
        .register(
            ToolDefinition::new(
                FORECAST_MARKET,
                "Forecast future market prices with a simple growth model",
            )
            .with_parameter(
                ToolParameter::new("trend_indicators", "Output of analyze_trends", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(
                ToolParameter::new("months_ahead", "Forecast horizon in months", false)
                    .with_type(ParamType::Integer)
                    .with_default(12),
            ),
        )
        .register(
            ToolDefinition::new(
                GENERATE_VISUAL_REPORTS,
                "Summarize market forecasts into a visual report record",
            )
            .with_parameter(
                ToolParameter::new("forecast_data", "Output of forecast_market", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(ToolParameter::new("output_file", "Report file name", false)),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("market", "Market Analysis Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        AGGREGATE_MARKET_DATA => execute_aggregate_market_data(call),
        ANALYZE_TRENDS => execute_analyze_trends(call),
        FORECAST_MARKET => execute_forecast_market(call),
        GENERATE_VISUAL_REPORTS => execute_generate_visual_reports(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

pub fn execute_aggregate_market_data(call: &ToolCall) -> ToolResult {
    let datasets = match call.require_array("datasets") {
        Ok(d) => d,
        Err(e) => {
            return ToolResult::failure(AGGREGATE_MARKET_DATA, ToolError::invalid_argument(e));
        }
    };
    let max_entries = call.get_i64("max_entries").unwrap_or(MAX_ENTRIES).max(0) as usize;

    let stamp = now_iso();
    let aggregated: Vec<Value> = datasets
        .iter()
        .take(max_entries)
        .map(|record| {
            let mut record = record.clone();
            if let Some(map) = record.as_object_mut() {
                map.insert("aggregated_at".to_string(), Value::String(stamp.clone()));
            }
            record
        })
        .collect();

    ToolResult::success(
        AGGREGATE_MARKET_DATA,
        json!({
            "aggregated_market_data": aggregated,
            "entries_count": aggregated.len(),
            "aggregated_at": stamp,
        }),
    )
}

pub fn execute_analyze_trends(call: &ToolCall) -> ToolResult {
    let market_data = match call.require_array("market_data") {
        Ok(d) => d,
        Err(e) => return ToolResult::failure(ANALYZE_TRENDS, ToolError::invalid_argument(e)),
    };

    let prices: Vec<f64> = market_data
        .iter()
        .filter_map(|item| item.get("price").and_then(Value::as_f64))
        .collect();

    let (average, range) = if prices.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = prices.iter().sum();
        let max = prices.iter().cloned().fold(f64::MIN, f64::max);
        let min = prices.iter().cloned().fold(f64::MAX, f64::min);
        (round2(sum / prices.len() as f64), round2(max - min))
    };

    ToolResult::success(
        ANALYZE_TRENDS,
        json!({
            "trend_indicators": {"average_price": average},
            "price_fluctuation_metrics": {"range": range},
            "analyzed_at": now_iso(),
        }),
    )
}

pub fn execute_forecast_market(call: &ToolCall) -> ToolResult {
    let indicators = match call.require_object("trend_indicators") {
        Ok(i) => i,
        Err(e) => return ToolResult::failure(FORECAST_MARKET, ToolError::invalid_argument(e)),
    };
    let months_ahead = call.get_i64("months_ahead").unwrap_or(12).max(0);

    let base = indicators
        .get("average_price")
        .and_then(Value::as_f64)
        .unwrap_or(1_000_000.0);

    let predictions: Vec<Value> = (1..=months_ahead)
        .map(|month| {
            json!({
                "month": month,
                "forecast_price": round2(base * (1.0 + 0.01 * month as f64)),
            })
        })
        .collect();

    ToolResult::success(
        FORECAST_MARKET,
        json!({
            "future_market_predictions": predictions,
            "forecast_generated_at": now_iso(),
        }),
    )
}

pub fn execute_generate_visual_reports(call: &ToolCall) -> ToolResult {
    let forecast = match call.require_object("forecast_data") {
        Ok(f) => f,
        Err(e) => {
            return ToolResult::failure(GENERATE_VISUAL_REPORTS, ToolError::invalid_argument(e));
        }
    };
    let output_file = call.get_string("output_file").unwrap_or("forecast_summary.json");

    let prices: Vec<f64> = forecast
        .get("future_market_predictions")
        .and_then(Value::as_array)
        .map(|predictions| {
            predictions
                .iter()
                .filter_map(|p| p.get("forecast_price").and_then(Value::as_f64))
                .collect()
        })
        .unwrap_or_default();

    let summary = if prices.is_empty() {
        json!({"max_predicted": 0, "min_predicted": 0, "mean_predicted": 0})
    } else {
        let sum: f64 = prices.iter().sum();
        json!({
            "max_predicted": prices.iter().cloned().fold(f64::MIN, f64::max),
            "min_predicted": prices.iter().cloned().fold(f64::MAX, f64::min),
            "mean_predicted": round2(sum / prices.len() as f64),
        })
    };

    ToolResult::success(
        GENERATE_VISUAL_REPORTS,
        json!({
            "visual_reports": summary,
            "generated_at": now_iso(),
            "output_file": output_file,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_caps_entries() {
        let call = ToolCall::new(AGGREGATE_MARKET_DATA)
            .with_arg("datasets", json!([{"price": 100}, {"price": 200}, {"price": 300}]))
            .with_arg("max_entries", 2);
        let result = execute_aggregate_market_data(&call);
        let output = result.output().unwrap();

        assert_eq!(output["entries_count"].as_u64(), Some(2));
        assert!(output["aggregated_market_data"][0]["aggregated_at"].is_string());
    }

    #[test]
    fn test_trends_average_and_range() {
        let call = ToolCall::new(ANALYZE_TRENDS).with_arg(
            "market_data",
            json!([{"price": 1_000_000}, {"price": 1_200_000}, {"no_price": true}]),
        );
        let result = execute_analyze_trends(&call);
        let output = result.output().unwrap();

        assert_eq!(
            output["trend_indicators"]["average_price"].as_f64(),
            Some(1_100_000.0)
        );
        assert_eq!(
            output["price_fluctuation_metrics"]["range"].as_f64(),
            Some(200_000.0)
        );
    }

    #[test]
    fn test_trends_empty_data() {
        let call = ToolCall::new(ANALYZE_TRENDS).with_arg("market_data", json!([]));
        let result = execute_analyze_trends(&call);
        assert_eq!(
            result.output().unwrap()["trend_indicators"]["average_price"].as_f64(),
            Some(0.0)
        );
    }

    #[test]
    fn test_forecast_growth_model() {
        let call = ToolCall::new(FORECAST_MARKET)
            .with_arg("trend_indicators", json!({"average_price": 1_000_000}))
            .with_arg("months_ahead", 3);
        let result = execute_forecast_market(&call);
        let predictions = result.output().unwrap()["future_market_predictions"]
            .as_array()
            .unwrap()
            .clone();

        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0]["forecast_price"].as_f64(), Some(1_010_000.0));
        assert_eq!(predictions[2]["forecast_price"].as_f64(), Some(1_030_000.0));
    }

    #[test]
    fn test_visual_report_summary() {
        let forecast = json!({
            "future_market_predictions": [
                {"month": 1, "forecast_price": 1_010_000.0},
                {"month": 2, "forecast_price": 1_020_000.0},
            ]
        });
        let call = ToolCall::new(GENERATE_VISUAL_REPORTS).with_arg("forecast_data", forecast);
        let result = execute_generate_visual_reports(&call);
        let summary = &result.output().unwrap()["visual_reports"];

        assert_eq!(summary["max_predicted"].as_f64(), Some(1_020_000.0));
        assert_eq!(summary["min_predicted"].as_f64(), Some(1_010_000.0));
        assert_eq!(summary["mean_predicted"].as_f64(), Some(1_015_000.0));
        assert_eq!(
            result.output().unwrap()["output_file"].as_str(),
            Some("forecast_summary.json")
        );
    }
}
