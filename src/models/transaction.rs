use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::{CardPresence, CardType, Decision, MerchantCategory, TransType};

pub const NO_RULES_TRIGGERED: &str = "No Rules Triggered";
pub const TRIGGERED_DELIMITER: &str = ",";
pub const EXPLANATION_DELIMITER: &str = " | ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub uniq_id: Uuid,
    pub trans_type: TransType,
    pub amount: Decimal,
    pub amount_crr: Decimal,
    pub account_holder_name: String,
    pub card_presense: CardPresence,
    pub merchant_category: MerchantCategory,
    pub card_type: CardType,
    pub card_id: String,
    pub account_id: Uuid,
    pub account_blacklisted: bool,
}

/// Rules fired for one transaction, in firing order.
///
/// The decision is derived from the hits, so a rejection can never be
/// turned back into an approval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    hits: Vec<(&'static str, &'static str)>,
}

impl RuleOutcome {
    pub fn record_hit(&mut self, rule_id: &'static str, explanation: &'static str) {
        self.hits.push((rule_id, explanation));
    }

    pub fn rules_triggered(&self) -> Vec<&'static str> {
        if self.hits.is_empty() {
            vec![NO_RULES_TRIGGERED]
        } else {
            self.hits.iter().map(|(id, _)| *id).collect()
        }
    }

    pub fn rules_explanation(&self) -> Vec<&'static str> {
        self.hits.iter().map(|(_, explanation)| *explanation).collect()
    }

    pub fn decision(&self) -> Decision {
        if self.hits.is_empty() {
            Decision::Approved
        } else {
            Decision::Rejected
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub outcome: RuleOutcome,
}

impl EvaluationResult {
    pub fn rules_triggered(&self) -> Vec<&'static str> {
        self.outcome.rules_triggered()
    }

    pub fn rules_explanation(&self) -> Vec<&'static str> {
        self.outcome.rules_explanation()
    }

    pub fn decision(&self) -> Decision {
        self.outcome.decision()
    }
}

/// One `banking_data` row, fields in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertableRow {
    pub batch_ts: DateTime<Utc>,
    pub uniq_id: Uuid,
    pub trans_type: TransType,
    pub amount: Decimal,
    pub amount_crr: Decimal,
    pub account_holder_name: String,
    pub card_presense: CardPresence,
    pub merchant_category: MerchantCategory,
    pub card_type: CardType,
    pub card_id: String,
    pub account_id: Uuid,
    pub account_blacklisted: bool,
    pub rules_triggered: String,
    pub rules_explanation: String,
    pub decision: Decision,
}

impl InsertableRow {
    pub const COLUMNS: [&'static str; 15] = [
        "batch_ts",
        "uniq_id",
        "trans_type",
        "amount",
        "amount_crr",
        "account_holder_name",
        "card_presense",
        "merchant_category",
        "card_type",
        "card_id",
        "account_id",
        "account_blacklisted",
        "rules_triggered",
        "rules_explanation",
        "decision",
    ];

    pub fn new(batch_ts: DateTime<Utc>, result: EvaluationResult) -> Self {
        let rules_triggered = result.rules_triggered().join(TRIGGERED_DELIMITER);
        let rules_explanation = result.rules_explanation().join(EXPLANATION_DELIMITER);
        let decision = result.decision();
        let record = result.record;

        Self {
            batch_ts,
            uniq_id: record.uniq_id,
            trans_type: record.trans_type,
            amount: record.amount,
            amount_crr: record.amount_crr,
            account_holder_name: record.account_holder_name,
            card_presense: record.card_presense,
            merchant_category: record.merchant_category,
            card_type: record.card_type,
            card_id: record.card_id,
            account_id: record.account_id,
            account_blacklisted: record.account_blacklisted,
            rules_triggered,
            rules_explanation,
            decision,
        }
    }
}
