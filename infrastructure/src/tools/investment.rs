//! Investment analysis tools: roi_calculator, risk_analysis,
//! cash_flow_projection
//!
//! Deterministic calculators; the formulas are load-bearing and covered by
//! tests.

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use serde_json::{json, Value};

use super::{now_iso, provider::ModuleToolProvider, round4};

pub const ROI_CALCULATOR: &str = "roi_calculator";
pub const RISK_ANALYSIS: &str = "risk_analysis";
pub const CASH_FLOW_PROJECTION: &str = "cash_flow_projection";

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                ROI_CALCULATOR,
                "Compute return on investment from price, rental income and expenses",
            )
            .with_parameter(
                ToolParameter::new("property_price", "Purchase price", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("rental_income", "Annual rental income", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("expenses", "Annual expenses", true)
                    .with_type(ParamType::Number),
            ),
        )
        .register(
            ToolDefinition::new(
                RISK_ANALYSIS,
                "Score investment risk from market trends and ROI metrics",
            )
            .with_parameter(
                ToolParameter::new("market_trends", "Market trend record (volatility)", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(
                ToolParameter::new("roi_metrics", "Output of roi_calculator", true)
                    .with_type(ParamType::Object),
            ),
        )
        .register(
            ToolDefinition::new(
                CASH_FLOW_PROJECTION,
                "Project yearly net cash flow for a financed property",
            )
            .with_parameter(
                ToolParameter::new("purchase_price", "Purchase price", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("rental_income", "Annual rental income", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("expenses", "Annual expenses", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("mortgage_payment", "Annual mortgage payment", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("years", "Projection horizon in years", false)
                    .with_type(ParamType::Integer)
                    .with_default(5),
            ),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("investment", "Investment Analysis Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        ROI_CALCULATOR => execute_roi_calculator(call),
        RISK_ANALYSIS => execute_risk_analysis(call),
        CASH_FLOW_PROJECTION => execute_cash_flow_projection(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

pub fn execute_roi_calculator(call: &ToolCall) -> ToolResult {
    let property_price = match call.require_f64("property_price") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(ROI_CALCULATOR, ToolError::invalid_argument(e)),
    };
    let rental_income = match call.require_f64("rental_income") {
        Ok(r) => r,
        Err(e) => return ToolResult::failure(ROI_CALCULATOR, ToolError::invalid_argument(e)),
    };
    let expenses = match call.require_f64("expenses") {
        Ok(x) => x,
        Err(e) => return ToolResult::failure(ROI_CALCULATOR, ToolError::invalid_argument(e)),
    };

    // ROI is 0 when the price is 0, never a division error
    let roi = if property_price == 0.0 {
        0.0
    } else {
        (rental_income - expenses) / property_price
    };

    ToolResult::success(
        ROI_CALCULATOR,
        json!({
            "property_price": property_price,
            "rental_income": rental_income,
            "expenses": expenses,
            "roi": round4(roi),
            "calculated_at": now_iso(),
        }),
    )
}

pub fn execute_risk_analysis(call: &ToolCall) -> ToolResult {
    let market_trends = match call.require_object("market_trends") {
        Ok(m) => m,
        Err(e) => return ToolResult::failure(RISK_ANALYSIS, ToolError::invalid_argument(e)),
    };
    let roi_metrics = match call.require_object("roi_metrics") {
        Ok(r) => r,
        Err(e) => return ToolResult::failure(RISK_ANALYSIS, ToolError::invalid_argument(e)),
    };

    let roi = roi_metrics.get("roi").and_then(Value::as_f64).unwrap_or(0.0);
    let volatility = market_trends
        .get("volatility")
        .and_then(Value::as_f64)
        .unwrap_or(0.1);
    let risk_score = (volatility * (1.0 - roi)).clamp(0.0, 1.0);

    ToolResult::success(
        RISK_ANALYSIS,
        json!({
            "roi": roi,
            "market_volatility": volatility,
            "risk_score": round4(risk_score),
            "analyzed_at": now_iso(),
        }),
    )
}

pub fn execute_cash_flow_projection(call: &ToolCall) -> ToolResult {
    let purchase_price = match call.require_f64("purchase_price") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(CASH_FLOW_PROJECTION, ToolError::invalid_argument(e)),
    };
    let rental_income = match call.require_f64("rental_income") {
        Ok(r) => r,
        Err(e) => return ToolResult::failure(CASH_FLOW_PROJECTION, ToolError::invalid_argument(e)),
    };
    let expenses = match call.require_f64("expenses") {
        Ok(x) => x,
        Err(e) => return ToolResult::failure(CASH_FLOW_PROJECTION, ToolError::invalid_argument(e)),
    };
    let mortgage_payment = match call.require_f64("mortgage_payment") {
        Ok(m) => m,
        Err(e) => return ToolResult::failure(CASH_FLOW_PROJECTION, ToolError::invalid_argument(e)),
    };
    let years = call.get_i64("years").unwrap_or(5).max(0);

    let net_cash_flow = rental_income - expenses - mortgage_payment;
    let projections: Vec<Value> = (1..=years)
        .map(|year| json!({"year": year, "net_cash_flow": net_cash_flow}))
        .collect();

    ToolResult::success(
        CASH_FLOW_PROJECTION,
        json!({
            "purchase_price": purchase_price,
            "years": years,
            "projections": projections,
            "projected_at": now_iso(),
        }),
    )
}
