//! Mortgage and financing tools: loan_option_engine,
//! eligibility_checker_engine, payment_simulator_engine

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use serde_json::{json, Value};

use super::{now_iso, provider::ModuleToolProvider, round2};

pub const LOAN_OPTION_ENGINE: &str = "loan_option_engine";
pub const ELIGIBILITY_CHECKER_ENGINE: &str = "eligibility_checker_engine";
pub const PAYMENT_SIMULATOR_ENGINE: &str = "payment_simulator_engine";

/// Simulated annual rates paired with loan durations in years
const BASE_RATES: [f64; 3] = [5.0, 5.5, 6.0];
const DURATIONS: [i64; 3] = [15, 20, 25];

/// Eligibility thresholds
const DEFAULT_MAX_DTI: f64 = 0.4;
const MIN_CREDIT_SCORE: i64 = 650;

/// Affordability cap: payment must stay within 30% of monthly income
const AFFORDABILITY_RATIO: f64 = 0.3;

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                LOAN_OPTION_ENGINE,
                "Generate loan options from property price, income and credit score",
            )
            .with_parameter(
                ToolParameter::new("property_price", "Property price", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("income", "Monthly income", true).with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("credit_score", "Credit score", true)
                    .with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("max_options", "Number of options to generate", false)
                    .with_type(ParamType::Integer)
                    .with_default(3),
            ),
        )
        .register(
            ToolDefinition::new(
                ELIGIBILITY_CHECKER_ENGINE,
                "Check loan eligibility from income, debt and credit score",
            )
            .with_parameter(
                ToolParameter::new("monthly_debt", "Monthly debt payments", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("income", "Monthly income", true).with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("credit_score", "Credit score", true)
                    .with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("max_dti", "Maximum debt-to-income ratio", false)
                    .with_type(ParamType::Number)
                    .with_default(DEFAULT_MAX_DTI),
            ),
        )
        .register(
            ToolDefinition::new(
                PAYMENT_SIMULATOR_ENGINE,
                "Simulate the payment schedule for a loan and check affordability",
            )
            .with_parameter(
                ToolParameter::new("loan_amount", "Loan principal", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("annual_rate", "Annual interest rate in percent", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("term_years", "Loan term in years", true)
                    .with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("income", "Monthly income", true).with_type(ParamType::Number),
            ),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("financing", "Mortgage & Financing Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        LOAN_OPTION_ENGINE => execute_loan_option_engine(call),
        ELIGIBILITY_CHECKER_ENGINE => execute_eligibility_checker_engine(call),
        PAYMENT_SIMULATOR_ENGINE => execute_payment_simulator_engine(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

pub fn execute_loan_option_engine(call: &ToolCall) -> ToolResult {
    let property_price = match call.require_f64("property_price") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(LOAN_OPTION_ENGINE, ToolError::invalid_argument(e)),
    };
    let income = match call.require_f64("income") {
        Ok(i) => i,
        Err(e) => return ToolResult::failure(LOAN_OPTION_ENGINE, ToolError::invalid_argument(e)),
    };
    let credit_score = match call.get_i64("credit_score") {
        Some(c) => c,
        None => {
            return ToolResult::failure(
                LOAN_OPTION_ENGINE,
                ToolError::invalid_argument("Missing required argument: credit_score"),
            );
        }
    };
    let max_options = call.get_i64("max_options").unwrap_or(3).max(0) as usize;

    let options: Vec<Value> = BASE_RATES
        .iter()
        .zip(DURATIONS.iter())
        .take(max_options)
        .map(|(rate, years)| {
            json!({
                "duration_years": years,
                "interest_rate": rate,
                "monthly_payment": round2(property_price * (rate / 100.0) / 12.0),
            })
        })
        .collect();

    ToolResult::success(
        LOAN_OPTION_ENGINE,
        json!({
            "property_price": property_price,
            "income": income,
            "credit_score": credit_score,
            "loan_options": options,
            "generated_at": now_iso(),
        }),
    )
}

pub fn execute_eligibility_checker_engine(call: &ToolCall) -> ToolResult {
    let monthly_debt = match call.require_f64("monthly_debt") {
        Ok(d) => d,
        Err(e) => {
            return ToolResult::failure(ELIGIBILITY_CHECKER_ENGINE, ToolError::invalid_argument(e));
        }
    };
    let income = match call.require_f64("income") {
        Ok(i) => i,
        Err(e) => {
            return ToolResult::failure(ELIGIBILITY_CHECKER_ENGINE, ToolError::invalid_argument(e));
        }
    };
    let credit_score = match call.get_i64("credit_score") {
        Some(c) => c,
        None => {
            return ToolResult::failure(
                ELIGIBILITY_CHECKER_ENGINE,
                ToolError::invalid_argument("Missing required argument: credit_score"),
            );
        }
    };
    let max_dti = call.get_f64("max_dti").unwrap_or(DEFAULT_MAX_DTI);

    // Zero income means a zero ratio, not a division error
    let dti_ratio = if income == 0.0 { 0.0 } else { monthly_debt / income };
    let eligible = dti_ratio <= max_dti && credit_score >= MIN_CREDIT_SCORE;

    ToolResult::success(
        ELIGIBILITY_CHECKER_ENGINE,
        json!({
            "monthly_debt": monthly_debt,
            "income": income,
            "credit_score": credit_score,
            "dti_ratio": round2(dti_ratio),
            "eligible": eligible,
            "checked_at": now_iso(),
        }),
    )
}

pub fn execute_payment_simulator_engine(call: &ToolCall) -> ToolResult {
    let loan_amount = match call.require_f64("loan_amount") {
        Ok(l) => l,
        Err(e) => {
            return ToolResult::failure(PAYMENT_SIMULATOR_ENGINE, ToolError::invalid_argument(e));
        }
    };
    let annual_rate = match call.require_f64("annual_rate") {
        Ok(r) => r,
        Err(e) => {
            return ToolResult::failure(PAYMENT_SIMULATOR_ENGINE, ToolError::invalid_argument(e));
        }
    };
    let term_years = match call.get_i64("term_years") {
        Some(t) => t.max(0),
        None => {
            return ToolResult::failure(
                PAYMENT_SIMULATOR_ENGINE,
                ToolError::invalid_argument("Missing required argument: term_years"),
            );
        }
    };
    let income = match call.require_f64("income") {
        Ok(i) => i,
        Err(e) => {
            return ToolResult::failure(PAYMENT_SIMULATOR_ENGINE, ToolError::invalid_argument(e));
        }
    };

    let monthly_rate = annual_rate / 12.0 / 100.0;
    let num_payments = term_years * 12;

    // Zero-term and zero-rate loans fall back instead of dividing by zero
    let monthly_payment = if num_payments == 0 {
        loan_amount
    } else {
        let growth = (1.0 + monthly_rate).powi(num_payments as i32);
        let denominator = growth - 1.0;
        if denominator == 0.0 {
            round2(loan_amount / num_payments as f64)
        } else {
            round2(loan_amount * (monthly_rate * growth) / denominator)
        }
    };

    let affordable = income > 0.0 && monthly_payment / income <= AFFORDABILITY_RATIO;

    let schedule: Vec<Value> = (1..=num_payments.min(12))
        .map(|month| json!({"month": month, "payment": monthly_payment}))
        .collect();

    ToolResult::success(
        PAYMENT_SIMULATOR_ENGINE,
        json!({
            "loan_amount": loan_amount,
            "annual_rate": annual_rate,
            "term_years": term_years,
            "monthly_payment": monthly_payment,
            "affordable": affordable,
            "payment_schedule": schedule,
            "simulated_at": now_iso(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_options_rates_and_payments() {
        let call = ToolCall::new(LOAN_OPTION_ENGINE)
            .with_arg("property_price", 1_200_000)
            .with_arg("income", 30_000)
            .with_arg("credit_score", 700);
        let result = execute_loan_option_engine(&call);
        let options = result.output().unwrap()["loan_options"].as_array().unwrap().clone();

        assert_eq!(options.len(), 3);
        assert_eq!(options[0]["interest_rate"].as_f64(), Some(5.0));
        assert_eq!(options[0]["duration_years"].as_i64(), Some(15));
        // 1_200_000 * 0.05 / 12
        assert_eq!(options[0]["monthly_payment"].as_f64(), Some(5_000.0));
    }

    #[test]
    fn test_eligibility_scenario() {
        let call = ToolCall::new(ELIGIBILITY_CHECKER_ENGINE)
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 700);
        let result = execute_eligibility_checker_engine(&call);
        let output = result.output().unwrap();

        assert_eq!(output["dti_ratio"].as_f64(), Some(0.2));
        assert_eq!(output["eligible"].as_bool(), Some(true));
    }

    #[test]
    fn test_eligibility_rejects_high_dti_or_low_score() {
        let call = ToolCall::new(ELIGIBILITY_CHECKER_ENGINE)
            .with_arg("monthly_debt", 12_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 700);
        let result = execute_eligibility_checker_engine(&call);
        assert_eq!(result.output().unwrap()["eligible"].as_bool(), Some(false));

        let call = ToolCall::new(ELIGIBILITY_CHECKER_ENGINE)
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 600);
        let result = execute_eligibility_checker_engine(&call);
        assert_eq!(result.output().unwrap()["eligible"].as_bool(), Some(false));
    }

    #[test]
    fn test_eligibility_zero_income() {
        let call = ToolCall::new(ELIGIBILITY_CHECKER_ENGINE)
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 0)
            .with_arg("credit_score", 700);
        let result = execute_eligibility_checker_engine(&call);
        assert_eq!(result.output().unwrap()["dti_ratio"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_amortization_schedule() {
        let call = ToolCall::new(PAYMENT_SIMULATOR_ENGINE)
            .with_arg("loan_amount", 100_000)
            .with_arg("annual_rate", 6)
            .with_arg("term_years", 30)
            .with_arg("income", 5_000);
        let result = execute_payment_simulator_engine(&call);
        let output = result.output().unwrap();

        // Standard amortization: ~599.55/month for 100k at 6% over 30y
        let payment = output["monthly_payment"].as_f64().unwrap();
        assert!((payment - 599.55).abs() < 0.01, "payment {}", payment);
        assert_eq!(output["affordable"].as_bool(), Some(true));
        assert_eq!(output["payment_schedule"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_zero_term_does_not_divide_by_zero() {
        let call = ToolCall::new(PAYMENT_SIMULATOR_ENGINE)
            .with_arg("loan_amount", 100_000)
            .with_arg("annual_rate", 6)
            .with_arg("term_years", 0)
            .with_arg("income", 5_000);
        let result = execute_payment_simulator_engine(&call);
        let output = result.output().unwrap();

        assert!(result.is_success());
        assert_eq!(output["monthly_payment"].as_f64(), Some(100_000.0));
        assert_eq!(output["affordable"].as_bool(), Some(false));
        assert!(output["payment_schedule"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_zero_rate_falls_back_to_linear_split() {
        let call = ToolCall::new(PAYMENT_SIMULATOR_ENGINE)
            .with_arg("loan_amount", 120_000)
            .with_arg("annual_rate", 0)
            .with_arg("term_years", 10)
            .with_arg("income", 5_000);
        let result = execute_payment_simulator_engine(&call);
        let output = result.output().unwrap();

        // 120_000 over 120 months
        assert_eq!(output["monthly_payment"].as_f64(), Some(1_000.0));
    }
}
