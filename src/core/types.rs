use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GoalType {
    MoreCoverage,
    TimeSavings,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Currency {
    Gbp,
    Usd,
    Eur,
}

/// Inputs for the generic spend-rate ROI projection. The statement count,
/// PO match rate, audit age and sales-view flag are carried for API fidelity
/// but do not feed the formulas.
#[derive(Debug, Clone)]
pub struct RoiInputs {
    pub number_of_statements: u32,
    pub annual_spend: f64,
    pub po_match_percentage: f64,
    pub years_since_last_audit: u32,
    pub is_sales_view: bool,
}

#[derive(Debug, Clone)]
pub struct StatementRecInputs {
    pub num_transactions: u32,
    pub annual_spend: f64,
    pub num_active_suppliers: u32,
    pub reconciled_suppliers: u32,
    pub effort_person_days: u32,
    pub goal_type: GoalType,
    pub currency: Currency,
}

/// Admin-tunable assumption constants for statement reconciliation.
/// `average_processing_time` and `annual_savings_multiplier` are accepted
/// but unused by the current formula set.
#[derive(Debug, Clone)]
pub struct StatementRecSettings {
    pub duplication_rate: f64,
    pub missing_invoice_rate: f64,
    pub average_credit_value: f64,
    pub average_processing_time: f64,
    pub average_hourly_cost: f64,
    pub annual_savings_multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct TransactionInputs {
    pub num_transactions: u32,
    pub annual_spend: f64,
    pub error_rate: f64,
    pub fraud_percentage: f64,
    pub num_active_suppliers: u32,
}

#[derive(Debug, Clone)]
pub struct TransactionSettings {
    pub average_fraud_amount: f64,
    pub error_correction_time: f64,
    pub average_hourly_cost: f64,
    pub compliance_penalty_avoidance: f64,
    pub annual_savings_multiplier: f64,
}

/// A per-year metric triple; every multi-year breakdown field is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBreakdown {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
}

/// 30/60/90/180-day implementation narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePlan {
    pub days30: String,
    pub days60: String,
    pub days90: String,
    pub days180: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub implementation_cost: f64,
    pub annual_maintenance: f64,
    pub expected_credits: f64,
    pub missing_invoice_recovery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiProjection {
    pub total_cost_savings: f64,
    pub three_year_roi: f64,
    pub payback_period: f64,
    pub roi_multiple: f64,
    pub expected_credits_found: i64,
    pub expected_credit_value: f64,
    pub missing_invoice_projections: i64,
    pub implementation_milestones: Vec<String>,
    pub cost_breakdown: CostBreakdown,
    pub yearly_projections: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRecProjection {
    pub cost_savings_year1: f64,
    pub cost_savings_year2: f64,
    pub cost_savings_year3: f64,
    pub total_cost_savings_3_year: f64,
    pub payback_period_months: i64,
    pub roi_multiple: f64,
    pub expected_credits_found: f64,
    pub expected_credit_value: f64,
    pub missing_invoice_projection: f64,
    pub processing_time_saved: f64,
    pub labor_cost_saved: f64,
    pub implementation_milestones: MilestonePlan,
    pub suppliers_reconciled: YearBreakdown,
    pub suppliers_with_errors: YearBreakdown,
    pub credits_recovered: YearBreakdown,
    pub time_saving_hours: YearBreakdown,
    pub time_saving_value: YearBreakdown,
    pub projected_roi_value: YearBreakdown,
    pub projected_roi_multiple: YearBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProjection {
    pub cost_savings_year1: f64,
    pub cost_savings_year2: f64,
    pub cost_savings_year3: f64,
    pub total_cost_savings_3_year: f64,
    pub payback_period_months: i64,
    pub roi_multiple: f64,
    pub fraud_prevention_savings: f64,
    pub error_reduction_savings: f64,
    pub compliance_savings: f64,
    pub processing_time_saved: f64,
    pub implementation_milestones: MilestonePlan,
}
