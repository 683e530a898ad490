mod engine;
mod format;
mod types;

pub use engine::{project_roi, project_statement_reconciliation, project_transaction_analysis};
pub use format::{format_currency, format_number};
pub use types::{
    CostBreakdown, Currency, GoalType, MilestonePlan, RoiInputs, RoiProjection,
    StatementRecInputs, StatementRecProjection, StatementRecSettings, TransactionInputs,
    TransactionProjection, TransactionSettings, YearBreakdown,
};
