use super::{evaluate, evaluate_one, RULES};

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generator::RecordGenerator;
use crate::models::{
    CardPresence, CardType, Decision, MerchantCategory, TransType, TransactionRecord,
    EXPLANATION_DELIMITER, NO_RULES_TRIGGERED, TRIGGERED_DELIMITER,
};

fn record(trans_type: TransType, amount: &str, account_blacklisted: bool) -> TransactionRecord {
    TransactionRecord {
        uniq_id: Uuid::new_v4(),
        trans_type,
        amount: Decimal::from_str(amount).unwrap(),
        amount_crr: Decimal::from_str("20.00").unwrap(),
        account_holder_name: "Grace Hopper".to_string(),
        card_presense: CardPresence::Present,
        merchant_category: MerchantCategory::Groceries,
        card_type: CardType::Mastercard,
        card_id: "5555555555554444".to_string(),
        account_id: Uuid::new_v4(),
        account_blacklisted,
    }
}

#[test]
fn test_dispute_is_never_screened() {
    let result = evaluate(record(TransType::Dispute, "999.99", true));

    assert_eq!(result.decision(), Decision::Approved);
    assert_eq!(result.rules_triggered(), vec![NO_RULES_TRIGGERED]);
    assert!(result.rules_explanation().is_empty());
}

#[test]
fn test_settlement_is_never_screened() {
    let result = evaluate(record(TransType::Settlement, "500.00", true));

    assert_eq!(result.decision(), Decision::Approved);
    assert_eq!(result.rules_triggered(), vec![NO_RULES_TRIGGERED]);
}

#[test]
fn test_blacklisted_small_amount_triggers_rule2_only() {
    let result = evaluate(record(TransType::RealTime, "50.00", true));

    assert_eq!(result.rules_triggered(), vec!["Rule2"]);
    assert_eq!(
        result.rules_explanation(),
        vec!["Account/card is blacklisted."]
    );
    assert_eq!(result.decision(), Decision::Rejected);
}

#[test]
fn test_large_amount_triggers_rule1_only() {
    let result = evaluate(record(TransType::RealTime, "150.00", false));

    assert_eq!(result.rules_triggered(), vec!["Rule1"]);
    assert_eq!(
        result.rules_explanation(),
        vec!["Transaction amount exceeds $100 limit."]
    );
    assert_eq!(result.decision(), Decision::Rejected);
}

#[test]
fn test_both_rules_fire_in_table_order() {
    let result = evaluate(record(TransType::RealTime, "150.00", true));

    assert_eq!(result.rules_triggered(), vec!["Rule2", "Rule1"]);
    assert_eq!(result.rules_explanation().len(), 2);
    assert_eq!(result.decision(), Decision::Rejected);
}

#[test]
fn test_amount_threshold_is_inclusive() {
    let at_limit = evaluate(record(TransType::RealTime, "100.00", false));
    let below_limit = evaluate(record(TransType::RealTime, "99.99", false));

    assert_eq!(at_limit.rules_triggered(), vec!["Rule1"]);
    assert_eq!(at_limit.decision(), Decision::Rejected);
    assert_eq!(below_limit.rules_triggered(), vec![NO_RULES_TRIGGERED]);
    assert_eq!(below_limit.decision(), Decision::Approved);
}

#[test]
fn test_clean_real_time_transaction_is_approved() {
    let result = evaluate(record(TransType::RealTime, "10.00", false));

    assert_eq!(result.rules_triggered(), vec![NO_RULES_TRIGGERED]);
    assert!(result.rules_explanation().is_empty());
    assert_eq!(result.decision(), Decision::Approved);
}

#[test]
fn test_evaluation_keeps_the_record() {
    let input = record(TransType::RealTime, "150.00", true);
    let result = evaluate(input.clone());

    assert_eq!(result.record, input);
}

#[test]
fn test_rule_properties_over_generated_records() {
    let mut generator = RecordGenerator::seeded(2024);

    for _ in 0..2_000 {
        let input = generator.generate();
        let blacklisted = input.account_blacklisted;
        let over_limit = input.amount >= Decimal::ONE_HUNDRED;
        let real_time = input.trans_type == TransType::RealTime;

        let result = evaluate(input);
        let triggered = result.rules_triggered();

        if !real_time {
            assert_eq!(triggered, vec![NO_RULES_TRIGGERED]);
            assert_eq!(result.decision(), Decision::Approved);
            continue;
        }

        assert_eq!(triggered.contains(&"Rule2"), blacklisted);
        assert_eq!(triggered.contains(&"Rule1"), over_limit);

        if blacklisted || over_limit {
            assert_eq!(result.decision(), Decision::Rejected);
            assert_eq!(result.rules_explanation().len(), triggered.len());
        } else {
            assert_eq!(triggered, vec![NO_RULES_TRIGGERED]);
            assert_eq!(result.decision(), Decision::Approved);
        }
    }
}

#[test]
fn test_evaluate_one_accepts_a_single_record() {
    let result = evaluate_one(std::iter::once(record(TransType::RealTime, "150.00", false)));

    assert_eq!(result.unwrap().rules_triggered(), vec!["Rule1"]);
}

#[test]
fn test_evaluate_one_rejects_empty_input() {
    let result = evaluate_one(Vec::new());

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[test]
fn test_evaluate_one_rejects_batches() {
    let records = vec![
        record(TransType::RealTime, "10.00", false),
        record(TransType::Dispute, "10.00", false),
    ];

    let err = evaluate_one(records).unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(err.to_string().contains("got 2"));
}

#[test]
fn test_rule_text_never_contains_delimiters() {
    for rule in RULES {
        assert!(!rule.id.contains(TRIGGERED_DELIMITER), "{}", rule.id);
        assert!(!rule.explanation.contains(EXPLANATION_DELIMITER), "{}", rule.id);
    }
    assert!(!NO_RULES_TRIGGERED.contains(TRIGGERED_DELIMITER));
}
