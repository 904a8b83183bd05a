#[cfg(test)]
mod tests;

use rust_decimal::Decimal;

use crate::errors::AppError;
use crate::models::{EvaluationResult, RuleOutcome, TransType, TransactionRecord};

pub struct Rule {
    pub id: &'static str,
    pub explanation: &'static str,
    fires: fn(&TransactionRecord) -> bool,
}

/// Evaluated in order; every rule runs, hits are reported in table order.
pub const RULES: &[Rule] = &[
    Rule {
        id: "Rule2",
        explanation: "Account/card is blacklisted.",
        fires: account_blacklisted,
    },
    Rule {
        id: "Rule1",
        explanation: "Transaction amount exceeds $100 limit.",
        fires: amount_over_limit,
    },
];

fn account_blacklisted(record: &TransactionRecord) -> bool {
    record.account_blacklisted
}

// inclusive, compared at the generated 2-digit precision
fn amount_over_limit(record: &TransactionRecord) -> bool {
    record.amount >= Decimal::ONE_HUNDRED
}

pub fn evaluate(record: TransactionRecord) -> EvaluationResult {
    let mut outcome = RuleOutcome::default();

    // only real-time transactions are screened
    if record.trans_type == TransType::RealTime {
        for rule in RULES.iter().filter(|rule| (rule.fires)(&record)) {
            outcome.record_hit(rule.id, rule.explanation);
        }
    }

    EvaluationResult { record, outcome }
}

/// Evaluates a single transaction, rejecting empty or multi-record input.
pub fn evaluate_one<I>(records: I) -> Result<EvaluationResult, AppError>
where
    I: IntoIterator<Item = TransactionRecord>,
{
    let mut records = records.into_iter();

    let record = records.next().ok_or_else(|| {
        AppError::InvalidInput("rule evaluation expects exactly one record, got none".to_string())
    })?;

    let extra = records.count();
    if extra > 0 {
        return Err(AppError::InvalidInput(format!(
            "rule evaluation expects exactly one record, got {}",
            extra + 1
        )));
    }

    Ok(evaluate(record))
}
