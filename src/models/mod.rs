mod transaction;

use std::fmt;

use serde::Serialize;

pub use transaction::{
    EvaluationResult, InsertableRow, RuleOutcome, TransactionRecord, EXPLANATION_DELIMITER,
    NO_RULES_TRIGGERED, TRIGGERED_DELIMITER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransType {
    #[serde(rename = "Real_time_transaction")]
    RealTime,
    #[serde(rename = "settlements")]
    Settlement,
    #[serde(rename = "dispute")]
    Dispute,
}

impl TransType {
    pub const ALL: [TransType; 3] = [Self::RealTime, Self::Settlement, Self::Dispute];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealTime => "Real_time_transaction",
            Self::Settlement => "settlements",
            Self::Dispute => "dispute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardPresence {
    Present,
    #[serde(rename = "Not Present")]
    NotPresent,
}

impl CardPresence {
    pub const ALL: [CardPresence; 2] = [Self::Present, Self::NotPresent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::NotPresent => "Not Present",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MerchantCategory {
    Retail,
    Electronics,
    Clothing,
    Groceries,
    Pharmacy,
    Entertainment,
    Dining,
    Travel,
    Utilities,
    Healthcare,
}

impl MerchantCategory {
    pub const ALL: [MerchantCategory; 10] = [
        Self::Retail,
        Self::Electronics,
        Self::Clothing,
        Self::Groceries,
        Self::Pharmacy,
        Self::Entertainment,
        Self::Dining,
        Self::Travel,
        Self::Utilities,
        Self::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Groceries => "Groceries",
            Self::Pharmacy => "Pharmacy",
            Self::Entertainment => "Entertainment",
            Self::Dining => "Dining",
            Self::Travel => "Travel",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
}

impl CardType {
    pub const ALL: [CardType; 2] = [Self::Visa, Self::Mastercard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(TransType, CardPresence, MerchantCategory, CardType, Decision);
