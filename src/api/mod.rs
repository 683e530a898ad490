use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Currency, GoalType, RoiInputs, StatementRecInputs, StatementRecSettings, TransactionInputs,
    TransactionSettings, project_roi, project_statement_reconciliation,
    project_transaction_analysis,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGoalType {
    #[serde(alias = "more_coverage", alias = "moreCoverage")]
    MoreCoverage,
    #[serde(alias = "time_savings", alias = "timeSavings")]
    TimeSavings,
}

impl From<ApiGoalType> for GoalType {
    fn from(value: ApiGoalType) -> Self {
        match value {
            ApiGoalType::MoreCoverage => GoalType::MoreCoverage,
            ApiGoalType::TimeSavings => GoalType::TimeSavings,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum ApiCurrency {
    #[serde(alias = "gbp")]
    Gbp,
    #[serde(alias = "usd")]
    Usd,
    #[serde(alias = "eur")]
    Eur,
}

impl From<ApiCurrency> for Currency {
    fn from(value: ApiCurrency) -> Self {
        match value {
            ApiCurrency::Gbp => Currency::Gbp,
            ApiCurrency::Usd => Currency::Usd,
            ApiCurrency::Eur => Currency::Eur,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RoiPayload {
    number_of_statements: Option<u32>,
    annual_spend: Option<f64>,
    po_match_percentage: Option<f64>,
    years_since_last_audit: Option<u32>,
    is_sales_view: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatementRecPayload {
    num_transactions: Option<u32>,
    annual_spend: Option<f64>,
    num_active_suppliers: Option<u32>,
    reconciled_suppliers: Option<u32>,
    effort_person_days: Option<u32>,
    goal_type: Option<ApiGoalType>,
    currency: Option<ApiCurrency>,

    duplication_rate: Option<f64>,
    missing_invoice_rate: Option<f64>,
    average_credit_value: Option<f64>,
    average_processing_time: Option<f64>,
    average_hourly_cost: Option<f64>,
    annual_savings_multiplier: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TransactionPayload {
    num_transactions: Option<u32>,
    annual_spend: Option<f64>,
    error_rate: Option<f64>,
    fraud_percentage: Option<f64>,
    num_active_suppliers: Option<u32>,

    average_fraud_amount: Option<f64>,
    error_correction_time: Option<f64>,
    average_hourly_cost: Option<f64>,
    compliance_penalty_avoidance: Option<f64>,
    annual_savings_multiplier: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn default_roi_inputs() -> RoiInputs {
    RoiInputs {
        number_of_statements: 100,
        annual_spend: 1_000_000.0,
        po_match_percentage: 50.0,
        years_since_last_audit: 3,
        is_sales_view: false,
    }
}

fn default_statement_rec_inputs() -> StatementRecInputs {
    StatementRecInputs {
        num_transactions: 10_000,
        annual_spend: 1_000_000.0,
        num_active_suppliers: 100,
        reconciled_suppliers: 10,
        effort_person_days: 20,
        goal_type: GoalType::MoreCoverage,
        currency: Currency::Gbp,
    }
}

fn default_statement_rec_settings() -> StatementRecSettings {
    StatementRecSettings {
        duplication_rate: 0.02,
        missing_invoice_rate: 0.05,
        average_credit_value: 500.0,
        average_processing_time: 20.0,
        average_hourly_cost: 25.0,
        annual_savings_multiplier: 1.1,
    }
}

fn default_transaction_inputs() -> TransactionInputs {
    TransactionInputs {
        num_transactions: 50_000,
        annual_spend: 8_000_000.0,
        error_rate: 3.5,
        fraud_percentage: 0.8,
        num_active_suppliers: 100,
    }
}

fn default_transaction_settings() -> TransactionSettings {
    TransactionSettings {
        average_fraud_amount: 4_500.0,
        error_correction_time: 45.0,
        average_hourly_cost: 25.0,
        compliance_penalty_avoidance: 75_000.0,
        annual_savings_multiplier: 1.1,
    }
}

fn require_money(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be a finite value >= 0"));
    }
    Ok(())
}

fn require_fraction(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("{name} must be between 0 and 1"));
    }
    Ok(())
}

fn build_roi_inputs(payload: RoiPayload) -> Result<RoiInputs, String> {
    let mut inputs = default_roi_inputs();

    if let Some(v) = payload.number_of_statements {
        inputs.number_of_statements = v;
    }
    if let Some(v) = payload.annual_spend {
        inputs.annual_spend = v;
    }
    if let Some(v) = payload.po_match_percentage {
        inputs.po_match_percentage = v;
    }
    if let Some(v) = payload.years_since_last_audit {
        inputs.years_since_last_audit = v;
    }
    if let Some(v) = payload.is_sales_view {
        inputs.is_sales_view = v;
    }

    require_money("annualSpend", inputs.annual_spend)?;
    if !inputs.po_match_percentage.is_finite()
        || !(0.0..=100.0).contains(&inputs.po_match_percentage)
    {
        return Err("poMatchPercentage must be between 0 and 100".to_string());
    }

    Ok(inputs)
}

fn build_statement_rec_request(
    payload: StatementRecPayload,
) -> Result<(StatementRecInputs, StatementRecSettings), String> {
    let mut inputs = default_statement_rec_inputs();
    let mut settings = default_statement_rec_settings();

    if let Some(v) = payload.num_transactions {
        inputs.num_transactions = v;
    }
    if let Some(v) = payload.annual_spend {
        inputs.annual_spend = v;
    }
    if let Some(v) = payload.num_active_suppliers {
        inputs.num_active_suppliers = v;
    }
    if let Some(v) = payload.reconciled_suppliers {
        inputs.reconciled_suppliers = v;
    }
    if let Some(v) = payload.effort_person_days {
        inputs.effort_person_days = v;
    }
    if let Some(v) = payload.goal_type {
        inputs.goal_type = v.into();
    }
    if let Some(v) = payload.currency {
        inputs.currency = v.into();
    }

    if let Some(v) = payload.duplication_rate {
        settings.duplication_rate = v;
    }
    if let Some(v) = payload.missing_invoice_rate {
        settings.missing_invoice_rate = v;
    }
    if let Some(v) = payload.average_credit_value {
        settings.average_credit_value = v;
    }
    if let Some(v) = payload.average_processing_time {
        settings.average_processing_time = v;
    }
    if let Some(v) = payload.average_hourly_cost {
        settings.average_hourly_cost = v;
    }
    if let Some(v) = payload.annual_savings_multiplier {
        settings.annual_savings_multiplier = v;
    }

    require_money("annualSpend", inputs.annual_spend)?;
    if inputs.reconciled_suppliers > inputs.num_active_suppliers {
        return Err("reconciledSuppliers must be <= numActiveSuppliers".to_string());
    }
    require_fraction("duplicationRate", settings.duplication_rate)?;
    require_fraction("missingInvoiceRate", settings.missing_invoice_rate)?;
    require_money("averageCreditValue", settings.average_credit_value)?;
    require_money("averageProcessingTime", settings.average_processing_time)?;
    require_money("averageHourlyCost", settings.average_hourly_cost)?;
    if !settings.annual_savings_multiplier.is_finite()
        || settings.annual_savings_multiplier < 0.5
    {
        return Err("annualSavingsMultiplier must be >= 0.5".to_string());
    }

    Ok((inputs, settings))
}

fn build_transaction_request(
    payload: TransactionPayload,
) -> Result<(TransactionInputs, TransactionSettings), String> {
    let mut inputs = default_transaction_inputs();
    let mut settings = default_transaction_settings();

    if let Some(v) = payload.num_transactions {
        inputs.num_transactions = v;
    }
    if let Some(v) = payload.annual_spend {
        inputs.annual_spend = v;
    }
    if let Some(v) = payload.error_rate {
        inputs.error_rate = v;
    }
    if let Some(v) = payload.fraud_percentage {
        inputs.fraud_percentage = v;
    }
    if let Some(v) = payload.num_active_suppliers {
        inputs.num_active_suppliers = v;
    }

    if let Some(v) = payload.average_fraud_amount {
        settings.average_fraud_amount = v;
    }
    if let Some(v) = payload.error_correction_time {
        settings.error_correction_time = v;
    }
    if let Some(v) = payload.average_hourly_cost {
        settings.average_hourly_cost = v;
    }
    if let Some(v) = payload.compliance_penalty_avoidance {
        settings.compliance_penalty_avoidance = v;
    }
    if let Some(v) = payload.annual_savings_multiplier {
        settings.annual_savings_multiplier = v;
    }

    require_money("annualSpend", inputs.annual_spend)?;
    if !inputs.error_rate.is_finite() || !(0.0..=100.0).contains(&inputs.error_rate) {
        return Err("errorRate must be between 0 and 100".to_string());
    }
    if !inputs.fraud_percentage.is_finite() || !(0.0..=10.0).contains(&inputs.fraud_percentage) {
        return Err("fraudPercentage must be between 0 and 10".to_string());
    }
    require_money("averageFraudAmount", settings.average_fraud_amount)?;
    require_money("errorCorrectionTime", settings.error_correction_time)?;
    require_money("averageHourlyCost", settings.average_hourly_cost)?;
    require_money(
        "compliancePenaltyAvoidance",
        settings.compliance_penalty_avoidance,
    )?;
    if !settings.annual_savings_multiplier.is_finite()
        || settings.annual_savings_multiplier < 0.5
    {
        return Err("annualSavingsMultiplier must be >= 0.5".to_string());
    }

    Ok((inputs, settings))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/roi/calculate",
            get(roi_get_handler).post(roi_post_handler),
        )
        .route(
            "/api/roi/statement-reconciliation",
            get(statement_rec_get_handler).post(statement_rec_post_handler),
        )
        .route(
            "/api/roi/transactions",
            get(transaction_get_handler).post(transaction_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("ROI projection API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn roi_get_handler(Query(payload): Query<RoiPayload>) -> Response {
    roi_handler_impl(payload)
}

async fn roi_post_handler(Json(payload): Json<RoiPayload>) -> Response {
    roi_handler_impl(payload)
}

fn roi_handler_impl(payload: RoiPayload) -> Response {
    match build_roi_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, project_roi(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn statement_rec_get_handler(Query(payload): Query<StatementRecPayload>) -> Response {
    statement_rec_handler_impl(payload)
}

async fn statement_rec_post_handler(Json(payload): Json<StatementRecPayload>) -> Response {
    statement_rec_handler_impl(payload)
}

fn statement_rec_handler_impl(payload: StatementRecPayload) -> Response {
    match build_statement_rec_request(payload) {
        Ok((inputs, settings)) => json_response(
            StatusCode::OK,
            project_statement_reconciliation(&inputs, &settings),
        ),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn transaction_get_handler(Query(payload): Query<TransactionPayload>) -> Response {
    transaction_handler_impl(payload)
}

async fn transaction_post_handler(Json(payload): Json<TransactionPayload>) -> Response {
    transaction_handler_impl(payload)
}

fn transaction_handler_impl(payload: TransactionPayload) -> Response {
    match build_transaction_request(payload) {
        Ok((inputs, settings)) => json_response(
            StatusCode::OK,
            project_transaction_analysis(&inputs, &settings),
        ),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn statement_rec_request_from_json(
        json: &str,
    ) -> Result<(StatementRecInputs, StatementRecSettings), String> {
        let payload = serde_json::from_str::<StatementRecPayload>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        build_statement_rec_request(payload)
    }

    fn transaction_request_from_json(
        json: &str,
    ) -> Result<(TransactionInputs, TransactionSettings), String> {
        let payload = serde_json::from_str::<TransactionPayload>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        build_transaction_request(payload)
    }

    #[test]
    fn roi_payload_merges_over_defaults() {
        let payload = serde_json::from_str::<RoiPayload>(r#"{"annualSpend": 2500000}"#)
            .expect("payload should parse");
        let inputs = build_roi_inputs(payload).expect("valid inputs");

        assert_approx(inputs.annual_spend, 2_500_000.0);
        assert_eq!(inputs.number_of_statements, 100);
        assert!(!inputs.is_sales_view);
    }

    #[test]
    fn roi_payload_rejects_out_of_range_po_match() {
        let payload = serde_json::from_str::<RoiPayload>(r#"{"poMatchPercentage": 150}"#)
            .expect("payload should parse");
        let err = build_roi_inputs(payload).expect_err("must reject > 100");
        assert!(err.contains("poMatchPercentage"));
    }

    #[test]
    fn statement_rec_request_parses_camel_case_keys() {
        let json = r#"{
          "numTransactions": 20000,
          "annualSpend": 3000000,
          "numActiveSuppliers": 250,
          "reconciledSuppliers": 40,
          "effortPersonDays": 15,
          "goalType": "time_savings",
          "currency": "USD",
          "duplicationRate": 0.03,
          "averageCreditValue": 750,
          "annualSavingsMultiplier": 1.2
        }"#;
        let (inputs, settings) = statement_rec_request_from_json(json).expect("json should parse");

        assert_eq!(inputs.num_transactions, 20_000);
        assert_approx(inputs.annual_spend, 3_000_000.0);
        assert_eq!(inputs.num_active_suppliers, 250);
        assert_eq!(inputs.reconciled_suppliers, 40);
        assert_eq!(inputs.effort_person_days, 15);
        assert_eq!(inputs.goal_type, GoalType::TimeSavings);
        assert_eq!(inputs.currency, Currency::Usd);
        assert_approx(settings.duplication_rate, 0.03);
        assert_approx(settings.average_credit_value, 750.0);
        assert_approx(settings.annual_savings_multiplier, 1.2);
        // untouched settings keep their defaults
        assert_approx(settings.missing_invoice_rate, 0.05);
        assert_approx(settings.average_hourly_cost, 25.0);
    }

    #[test]
    fn statement_rec_request_accepts_kebab_goal_type() {
        let (inputs, _) =
            statement_rec_request_from_json(r#"{"goalType": "more-coverage", "currency": "eur"}"#)
                .expect("aliases should parse");
        assert_eq!(inputs.goal_type, GoalType::MoreCoverage);
        assert_eq!(inputs.currency, Currency::Eur);
    }

    #[test]
    fn statement_rec_request_rejects_reconciled_above_active() {
        let err = statement_rec_request_from_json(
            r#"{"numActiveSuppliers": 10, "reconciledSuppliers": 11}"#,
        )
        .expect_err("must reject reconciled > active");
        assert!(err.contains("reconciledSuppliers"));
    }

    #[test]
    fn statement_rec_request_rejects_rate_above_one() {
        let err = statement_rec_request_from_json(r#"{"duplicationRate": 1.5}"#)
            .expect_err("must reject rate > 1");
        assert!(err.contains("duplicationRate"));
    }

    #[test]
    fn statement_rec_request_rejects_low_multiplier() {
        let err = statement_rec_request_from_json(r#"{"annualSavingsMultiplier": 0.4}"#)
            .expect_err("must reject multiplier < 0.5");
        assert!(err.contains("annualSavingsMultiplier"));
    }

    #[test]
    fn transaction_request_rejects_fraud_above_cap() {
        let err = transaction_request_from_json(r#"{"fraudPercentage": 10.5}"#)
            .expect_err("must reject fraud > 10");
        assert!(err.contains("fraudPercentage"));
    }

    #[test]
    fn transaction_request_rejects_negative_spend() {
        let err = transaction_request_from_json(r#"{"annualSpend": -1}"#)
            .expect_err("must reject negative spend");
        assert!(err.contains("annualSpend"));
    }

    #[test]
    fn roi_response_serialization_contains_expected_fields() {
        let inputs = default_roi_inputs();
        let json =
            serde_json::to_string(&project_roi(&inputs)).expect("projection should serialize");

        assert!(json.contains("\"totalCostSavings\""));
        assert!(json.contains("\"threeYearRoi\""));
        assert!(json.contains("\"paybackPeriod\""));
        assert!(json.contains("\"roiMultiple\""));
        assert!(json.contains("\"expectedCreditsFound\""));
        assert!(json.contains("\"missingInvoiceProjections\""));
        assert!(json.contains("\"implementationMilestones\""));
        assert!(json.contains("\"costBreakdown\""));
        assert!(json.contains("\"yearlyProjections\""));
    }

    #[test]
    fn statement_rec_response_serialization_contains_expected_fields() {
        let inputs = default_statement_rec_inputs();
        let settings = default_statement_rec_settings();
        let json = serde_json::to_string(&project_statement_reconciliation(&inputs, &settings))
            .expect("projection should serialize");

        assert!(json.contains("\"costSavingsYear1\""));
        assert!(json.contains("\"totalCostSavings3Year\""));
        assert!(json.contains("\"paybackPeriodMonths\""));
        assert!(json.contains("\"suppliersReconciled\""));
        assert!(json.contains("\"suppliersWithErrors\""));
        assert!(json.contains("\"projectedRoiMultiple\""));
        assert!(json.contains("\"year1\""));
        assert!(json.contains("\"year3\""));
        assert!(json.contains("\"days30\""));
        assert!(json.contains("\"days180\""));
    }

    #[test]
    fn transaction_response_serialization_contains_expected_fields() {
        let inputs = default_transaction_inputs();
        let settings = default_transaction_settings();
        let json = serde_json::to_string(&project_transaction_analysis(&inputs, &settings))
            .expect("projection should serialize");

        assert!(json.contains("\"fraudPreventionSavings\""));
        assert!(json.contains("\"errorReductionSavings\""));
        assert!(json.contains("\"complianceSavings\""));
        assert!(json.contains("\"processingTimeSaved\""));
        assert!(json.contains("\"implementationMilestones\""));
        assert!(json.contains("\"days60\""));
    }

    #[test]
    fn empty_payloads_produce_default_projections() {
        let (inputs, settings) = statement_rec_request_from_json("{}").expect("defaults are valid");
        let projection = project_statement_reconciliation(&inputs, &settings);
        assert_approx(projection.expected_credits_found, 200.0);
        assert_approx(projection.expected_credit_value, 100_000.0);

        let (inputs, settings) = transaction_request_from_json("{}").expect("defaults are valid");
        let projection = project_transaction_analysis(&inputs, &settings);
        assert_approx(projection.fraud_prevention_savings, 1_530_000.0);
    }
}
