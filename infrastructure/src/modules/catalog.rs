//! Module catalog
//!
//! Static definitions of the seven dashboard modules: display metadata and
//! the team wired to each. Agent rosters mirror the product playbooks; the
//! tool lists reference the provider tools by name.
//!
//! `module7` ships catalog metadata but has no team implementation yet, so
//! building it reports a typed unavailable error that the registry records
//! at bootstrap.

use estate_domain::{AgentProfile, DomainError, Model, ModuleId, ModuleMetadata, TeamProfile};

use crate::tools::{financing, investment, legal, market, search, valuation};

/// Display metadata for every module, in dashboard order
pub fn catalog() -> Vec<(ModuleId, ModuleMetadata)> {
    vec![
        (
            ModuleId::from("module1"),
            ModuleMetadata::new(
                "Property Valuation",
                "Automated property assessment and market analysis",
                "🏠",
                "#667eea",
                "Property Valuation Team",
            ),
        ),
        (
            ModuleId::from("module2"),
            ModuleMetadata::new(
                "Lead Management",
                "Lead generation, qualification, and CRM integration",
                "🎯",
                "#764ba2",
                "Lead Management Team",
            ),
        ),
        (
            ModuleId::from("module3"),
            ModuleMetadata::new(
                "Marketing & Listings",
                "Property marketing and listing optimization",
                "📢",
                "#f093fb",
                "Marketing & Listings Team",
            ),
        ),
        (
            ModuleId::from("module4"),
            ModuleMetadata::new(
                "Transaction Management",
                "Contract processing and closing coordination",
                "📋",
                "#4facfe",
                "Transaction Management Team",
            ),
        ),
        (
            ModuleId::from("module5"),
            ModuleMetadata::new(
                "Market Analysis",
                "Market research and investment analysis",
                "📊",
                "#43e97b",
                "Market Analysis Team",
            ),
        ),
        (
            ModuleId::from("module6"),
            ModuleMetadata::new(
                "Client Relations",
                "Client success and relationship management",
                "🤝",
                "#fa709a",
                "Client Relations Team",
            ),
        ),
        (
            ModuleId::from("module7"),
            ModuleMetadata::new(
                "Operations & Intelligence",
                "Ops orchestration, intel scanning, forecasting & risk",
                "🧭",
                "#0ea5e9",
                "Operations & Intelligence Team",
            ),
        ),
    ]
}

/// Build the team backing a module.
///
/// Returns [`DomainError::ModuleUnavailable`] for unknown ids and for
/// cataloged modules without a team implementation.
pub fn build_team(id: &ModuleId, model: &Model) -> Result<TeamProfile, DomainError> {
    match id.as_str() {
        "module1" => property_valuation_team(model),
        "module2" => property_search_team(model),
        "module3" => market_analysis_team(model),
        "module4" => investment_analysis_team(model),
        "module5" => mortgage_financing_team(model),
        "module6" => legal_compliance_team(model),
        "module7" => Err(DomainError::module_unavailable(
            id.as_str(),
            "no team implementation available",
        )),
        _ => Err(DomainError::module_unavailable(id.as_str(), "unknown module")),
    }
}

fn property_valuation_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("Data Collector Agent", model.clone())
            .with_description(
                "Collects and normalizes property data: subject features, recent \
                 comparable sales and market signals from web listings and uploaded documents.",
            )
            .with_instructions(
                "Collect the subject property's features, retrieve relevant comparable \
                 sales, then normalize and deduplicate the data. Use avm_engine for an \
                 initial estimate, web_property_scraper and document_property_parser to \
                 gather and normalize attributes, and kb_ingest_indexer to index collected \
                 documents. Report subject_property, comparable_sales and source_metadata.",
            )
            .with_tools([
                valuation::AVM_ENGINE,
                valuation::WEB_PROPERTY_SCRAPER,
                valuation::DOCUMENT_PROPERTY_PARSER,
                valuation::KB_INGEST_INDEXER,
            ]),
        AgentProfile::new("Valuation Model Agent", model.clone())
            .with_description(
                "Estimates property value through multiple methods: price per square \
                 foot, adjusted comparables and model-based prediction.",
            )
            .with_instructions(
                "Produce robust valuations from the subject property and comparables. \
                 Compute estimates with standard methods, explain the determining factors \
                 (area, bedrooms, age, condition) and aggregate a final value with a \
                 confidence score. Use avm_engine for a quick automatic estimate and \
                 valuation_model_runner for detailed model predictions. Report \
                 valuation_methods, final_valuation and notes.",
            )
            .with_tools([valuation::AVM_ENGINE, valuation::VALUATION_MODEL_RUNNER]),
        AgentProfile::new("Report Generator Agent", model.clone())
            .with_description(
                "Produces a complete valuation report with the final estimate, market \
                 positioning and a confidence score.",
            )
            .with_instructions(
                "Compile the collected data and the valuation results into a structured, \
                 readable report. Keep the data consistent and the explanations clear. \
                 Report valuation_report, confidence_score and optional recommendations.",
            ),
    ];

    Ok(TeamProfile::new("PropertyValuation", model.clone(), members)?
        .with_description(
            "Collects, values and reports on a property, producing a final estimate \
             with a confidence score.",
        )
        .with_instructions(
            "Workflow: 1) Data Collector Agent collects and normalizes the data. \
             2) Valuation Model Agent computes multi-method valuations and a final value. \
             3) Report Generator Agent writes the final report with the confidence score. \
             Include valuation methods, final value, confidence score and data sources.",
        ))
}

fn property_search_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("Search Query Agent", model.clone())
            .with_description("Finds candidate properties matching explicit user criteria.")
            .with_instructions(
                "Turn the user's request into search criteria (location, type, budget, \
                 minimum area) and run search_properties to gather candidate listings.",
            )
            .with_tools([search::SEARCH_PROPERTIES]),
        AgentProfile::new("User Preference Agent", model.clone())
            .with_description("Builds a preference profile from the user's stated constraints.")
            .with_instructions(
                "Extract the user's explicit preferences and run generate_user_profile to \
                 produce a profile record with budget, preferred type and location.",
            )
            .with_tools([search::GENERATE_USER_PROFILE]),
        AgentProfile::new("Recommendation Engine Agent", model.clone())
            .with_description("Ranks candidate properties against the user profile.")
            .with_instructions(
                "Run recommend_properties with the candidate listings and the user \
                 profile, then present the top recommendations with a short rationale \
                 for each.",
            )
            .with_tools([search::RECOMMEND_PROPERTIES]),
    ];

    Ok(TeamProfile::new("PropertySearch", model.clone(), members)?
        .with_description("Searches, profiles and recommends properties for a prospect.")
        .with_instructions(
            "Workflow: 1) Search Query Agent gathers candidates. 2) User Preference \
             Agent builds the profile. 3) Recommendation Engine Agent ranks candidates \
             and answers with the best matches.",
        ))
}

fn market_analysis_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("Data Aggregator Agent", model.clone())
            .with_description("Aggregates market data from datasets, listings and history.")
            .with_instructions(
                "Gather the relevant market records and run aggregate_market_data to \
                 produce a clean, capped dataset for analysis.",
            )
            .with_tools([market::AGGREGATE_MARKET_DATA]),
        AgentProfile::new("Trend Analysis Agent", model.clone())
            .with_description("Analyzes price trends and fluctuations in aggregated data.")
            .with_instructions(
                "Run analyze_trends over the aggregated market data and explain the \
                 average price level and the observed price range.",
            )
            .with_tools([market::ANALYZE_TRENDS]),
        AgentProfile::new("Forecasting Agent", model.clone())
            .with_description("Projects future market prices from trend indicators.")
            .with_instructions(
                "Run forecast_market with the trend indicators. Always report the \
                 forecast horizon alongside the predictions.",
            )
            .with_tools([market::FORECAST_MARKET]),
        AgentProfile::new("Visualization Agent", model.clone())
            .with_description("Summarizes forecasts into a compact visual report record.")
            .with_instructions(
                "Run generate_visual_reports over the forecast and present the minimum, \
                 maximum and mean predicted prices.",
            )
            .with_tools([market::GENERATE_VISUAL_REPORTS]),
    ];

    Ok(TeamProfile::new("MarketAnalysis", model.clone(), members)?
        .with_description("Aggregates, analyzes, forecasts and summarizes market data.")
        .with_instructions(
            "Workflow: 1) Data Aggregator Agent builds the dataset. 2) Trend Analysis \
             Agent extracts indicators. 3) Forecasting Agent projects prices. \
             4) Visualization Agent produces the report summary.",
        ))
}

fn investment_analysis_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("ROI Calculator Agent", model.clone())
            .with_description("Computes return on investment for a property deal.")
            .with_instructions(
                "Run roi_calculator with the property price, rental income and expenses, \
                 and explain the resulting ratio.",
            )
            .with_tools([investment::ROI_CALCULATOR]),
        AgentProfile::new("Risk Analysis Agent", model.clone())
            .with_description("Scores investment risk from market trends and ROI metrics.")
            .with_instructions(
                "Run risk_analysis with the market trend record and the ROI metrics and \
                 interpret the risk score on its 0 to 1 scale.",
            )
            .with_tools([investment::RISK_ANALYSIS]),
        AgentProfile::new("Cash Flow Projection Agent", model.clone())
            .with_description("Projects yearly net cash flow for a financed property.")
            .with_instructions(
                "Run cash_flow_projection with income, expenses and the mortgage payment \
                 and present the yearly projections.",
            )
            .with_tools([investment::CASH_FLOW_PROJECTION]),
    ];

    Ok(TeamProfile::new("InvestmentAnalysis", model.clone(), members)?
        .with_description("Evaluates a property investment: ROI, risk and cash flow.")
        .with_instructions(
            "Workflow: 1) ROI Calculator Agent computes the return. 2) Risk Analysis \
             Agent scores the risk. 3) Cash Flow Projection Agent projects the cash \
             flows and closes with an overall assessment.",
        ))
}

fn mortgage_financing_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("Loan Options Agent", model.clone())
            .with_description("Generates candidate loan options for a purchase.")
            .with_instructions(
                "Run loan_option_engine with the property price, income and credit score \
                 and compare the generated options.",
            )
            .with_tools([financing::LOAN_OPTION_ENGINE]),
        AgentProfile::new("Eligibility Checker Agent", model.clone())
            .with_description("Checks loan eligibility from income, debt and credit score.")
            .with_instructions(
                "Run eligibility_checker_engine and explain the debt-to-income ratio and \
                 the eligibility decision.",
            )
            .with_tools([financing::ELIGIBILITY_CHECKER_ENGINE]),
        AgentProfile::new("Payment Simulator Agent", model.clone())
            .with_description("Simulates the payment schedule and checks affordability.")
            .with_instructions(
                "Run payment_simulator_engine for the chosen loan and present the monthly \
                 payment, the affordability verdict and the first months of the schedule.",
            )
            .with_tools([financing::PAYMENT_SIMULATOR_ENGINE]),
    ];

    Ok(TeamProfile::new("MortgageFinancing", model.clone(), members)?
        .with_description("Explores financing: loan options, eligibility and payments.")
        .with_instructions(
            "Workflow: 1) Loan Options Agent generates options. 2) Eligibility Checker \
             Agent validates the borrower. 3) Payment Simulator Agent simulates the \
             schedule and affordability.",
        ))
}

fn legal_compliance_team(model: &Model) -> Result<TeamProfile, DomainError> {
    let members = vec![
        AgentProfile::new("Document Verification Agent", model.clone())
            .with_description("Extracts key information from legal documents.")
            .with_instructions(
                "Run document_parser_tool over the provided document and report the \
                 title, contract number, parties, dates and clauses found.",
            )
            .with_tools([legal::DOCUMENT_PARSER_TOOL]),
        AgentProfile::new("Compliance Check Agent", model.clone())
            .with_description("Checks properties and transactions against compliance rules.")
            .with_instructions(
                "Run compliance_checker_tool with the property and transaction records \
                 and list every detected issue.",
            )
            .with_tools([legal::COMPLIANCE_CHECKER_TOOL]),
        AgentProfile::new("Contract Review Agent", model.clone())
            .with_description("Summarizes contracts and flags risky language.")
            .with_instructions(
                "Run contract_nlp_tool over the contract text, present the summary and \
                 explain each flagged risk keyword.",
            )
            .with_tools([legal::CONTRACT_NLP_TOOL]),
    ];

    Ok(TeamProfile::new("LegalCompliance", model.clone(), members)?
        .with_description("Verifies documents, checks compliance and reviews contracts.")
        .with_instructions(
            "Workflow: 1) Document Verification Agent parses the documents. \
             2) Compliance Check Agent validates the transaction. 3) Contract Review \
             Agent summarizes and flags risks.",
        ))
}
