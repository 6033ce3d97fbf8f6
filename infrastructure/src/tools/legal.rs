//! Legal and compliance tools: document_parser_tool,
//! compliance_checker_tool, contract_nlp_tool

use estate_domain::{ParamType, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use regex::Regex;
use serde_json::{json, Value};
use std::fs;

use super::{now_iso, provider::ModuleToolProvider};

pub const DOCUMENT_PARSER_TOOL: &str = "document_parser_tool";
pub const COMPLIANCE_CHECKER_TOOL: &str = "compliance_checker_tool";
pub const CONTRACT_NLP_TOOL: &str = "contract_nlp_tool";

/// Risk keywords flagged by the contract reviewer
const RISK_KEYWORDS: [&str; 4] = ["penalty", "breach", "termination", "fine"];

/// Contract summaries are truncated to this many characters
const SUMMARY_CHARS: usize = 200;

pub fn tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                DOCUMENT_PARSER_TOOL,
                "Parse legal documents (title, contract) and extract key information",
            )
            .with_parameter(ToolParameter::new("file_path", "Path to the document", true))
            .with_parameter(ToolParameter::new("doc_type", "Document type hint", false)),
        )
        .register(
            ToolDefinition::new(
                COMPLIANCE_CHECKER_TOOL,
                "Check a property and transaction against legal compliance rules",
            )
            .with_parameter(
                ToolParameter::new("property_data", "Property record", true)
                    .with_type(ParamType::Object),
            )
            .with_parameter(
                ToolParameter::new("transaction_data", "Transaction record", true)
                    .with_type(ParamType::Object),
            ),
        )
        .register(
            ToolDefinition::new(
                CONTRACT_NLP_TOOL,
                "Summarize contract text and flag risk keywords",
            )
            .with_parameter(ToolParameter::new("contract_text", "Full contract text", true)),
        )
}

pub fn provider() -> ModuleToolProvider {
    ModuleToolProvider::new("legal", "Legal & Compliance Tools", tool_spec(), dispatch)
}

fn dispatch(call: &ToolCall) -> ToolResult {
    match call.tool_name.as_str() {
        DOCUMENT_PARSER_TOOL => execute_document_parser(call),
        COMPLIANCE_CHECKER_TOOL => execute_compliance_checker(call),
        CONTRACT_NLP_TOOL => execute_contract_nlp(call),
        other => ToolResult::failure(other, ToolError::not_found(other)),
    }
}

pub fn execute_document_parser(call: &ToolCall) -> ToolResult {
    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(DOCUMENT_PARSER_TOOL, ToolError::invalid_argument(e)),
    };
    let doc_type = call.get_string("doc_type");

    let content = match fs::read_to_string(file_path) {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(
                DOCUMENT_PARSER_TOOL,
                ToolError::not_found(file_path).with_details(e.to_string()),
            );
        }
    };

    let mut matched_lines: Vec<String> = Vec::new();

    let title = capture_first(r"(?i)(Title|Property Title)\s*[:\-]?\s*(.+)", &content, 2, &mut matched_lines);
    let contract_number = capture_first(
        r"(?i)(Contract Number|No\.)\s*[:\-]?\s*(\w+)",
        &content,
        2,
        &mut matched_lines,
    );
    let dates = capture_all(r"\d{2}/\d{2}/\d{4}", &content, 0, &mut matched_lines);
    let parties = capture_all(
        r"(?i)(Seller|Buyer|Party)\s*[:\-]?\s*(.+)",
        &content,
        2,
        &mut matched_lines,
    );
    let clauses = capture_all(r"(?i)(Clause\s*\d+:.+)", &content, 1, &mut matched_lines);

    matched_lines.truncate(5);
    ToolResult::success(
        DOCUMENT_PARSER_TOOL,
        json!({
            "file_path": file_path,
            "doc_type": doc_type,
            "extracted": {
                "title": title,
                "contract_number": contract_number,
                "parties": parties,
                "dates": dates,
                "clauses": clauses,
            },
            "matched_examples": matched_lines,
            "parsed_at": now_iso(),
        }),
    )
}

/// First match of `group` for the pattern, recording the matched line
fn capture_first(
    pattern: &str,
    content: &str,
    group: usize,
    matched: &mut Vec<String>,
) -> Value {
    let Ok(re) = Regex::new(pattern) else {
        return Value::Null;
    };
    match re.captures(content) {
        Some(caps) => {
            if let Some(whole) = caps.get(0) {
                matched.push(whole.as_str().trim().to_string());
            }
            caps.get(group)
                .map(|m| Value::from(m.as_str().trim()))
                .unwrap_or(Value::Null)
        }
        None => Value::Null,
    }
}

/// Every match of `group` for the pattern, recording the matched lines
fn capture_all(
    pattern: &str,
    content: &str,
    group: usize,
    matched: &mut Vec<String>,
) -> Vec<String> {
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| {
            if let Some(whole) = caps.get(0) {
                matched.push(whole.as_str().trim().to_string());
            }
            caps.get(group).map(|m| m.as_str().trim().to_string())
        })
        .collect()
}

pub fn execute_compliance_checker(call: &ToolCall) -> ToolResult {
    let property_data = match call.require_object("property_data") {
        Ok(p) => p,
        Err(e) => {
            return ToolResult::failure(COMPLIANCE_CHECKER_TOOL, ToolError::invalid_argument(e));
        }
    };
    let transaction_data = match call.require_object("transaction_data") {
        Ok(t) => t,
        Err(e) => {
            return ToolResult::failure(COMPLIANCE_CHECKER_TOOL, ToolError::invalid_argument(e));
        }
    };

    let mut issues: Vec<&str> = Vec::new();
    if property_data
        .get("year_built")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        < 1900
    {
        issues.push("Property older than 1900, check historical regulations.");
    }
    if transaction_data
        .get("sale_price")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        <= 0.0
    {
        issues.push("Sale price missing or invalid.");
    }

    ToolResult::success(
        COMPLIANCE_CHECKER_TOOL,
        json!({
            "property_id": property_data.get("property_id"),
            "transaction_id": transaction_data.get("transaction_id"),
            "compliance_issues": issues,
            "is_compliant": issues.is_empty(),
            "checked_at": now_iso(),
        }),
    )
}

pub fn execute_contract_nlp(call: &ToolCall) -> ToolResult {
    let contract_text = match call.require_string("contract_text") {
        Ok(t) => t,
        Err(e) => return ToolResult::failure(CONTRACT_NLP_TOOL, ToolError::invalid_argument(e)),
    };

    let summary = if contract_text.chars().count() > SUMMARY_CHARS {
        let truncated: String = contract_text.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", truncated)
    } else {
        contract_text.to_string()
    };

    let lowered = contract_text.to_lowercase();
    let risk_flags: Vec<&str> = RISK_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .collect();

    ToolResult::success(
        CONTRACT_NLP_TOOL,
        json!({
            "summary": summary,
            "risk_flags": risk_flags,
            "analyzed_at": now_iso(),
        }),
    )
}
