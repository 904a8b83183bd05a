mod card;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::{Builder, Uuid};

use crate::models::{CardPresence, CardType, MerchantCategory, TransType, TransactionRecord};

// amounts are drawn in cents: [10.00, 1000.00]
const MIN_AMOUNT_CENTS: i64 = 1_000;
const MAX_AMOUNT_CENTS: i64 = 100_000;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Carlos", "Priya", "Wei", "Fatima", "Hiroshi", "Olga", "Kwame", "Ines",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson",
    "Nguyen", "Patel", "Kim", "Okafor", "Schmidt", "Rossi", "Tanaka", "Kowalski",
];

/// Produces synthetic transactions from its own random source.
pub struct RecordGenerator<R = StdRng> {
    rng: R,
}

impl RecordGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> TransactionRecord {
        let card_type = self.pick(&CardType::ALL);

        TransactionRecord {
            uniq_id: self.uuid(),
            trans_type: self.pick(&TransType::ALL),
            amount: self.amount(),
            amount_crr: self.amount(),
            account_holder_name: self.holder_name(),
            card_presense: self.pick(&CardPresence::ALL),
            merchant_category: self.pick(&MerchantCategory::ALL),
            card_type,
            card_id: card::card_number(&mut self.rng, card_type),
            account_id: self.uuid(),
            account_blacklisted: self.rng.gen_bool(0.5),
        }
    }

    fn pick<T: Copy>(&mut self, domain: &[T]) -> T {
        // domains are non-empty constants
        domain[self.rng.gen_range(0..domain.len())]
    }

    fn uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    fn amount(&mut self) -> Decimal {
        Decimal::new(self.rng.gen_range(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS), 2)
    }

    fn holder_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Doe");
        format!("{first} {last}")
    }
}
