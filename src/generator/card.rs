use rand::Rng;

use crate::models::CardType;

const CARD_LENGTH: usize = 16;

pub fn card_number<R: Rng>(rng: &mut R, card_type: CardType) -> String {
    let mut digits: Vec<u8> = match card_type {
        CardType::Visa => vec![4],
        // 51-55 range
        CardType::Mastercard => vec![5, rng.gen_range(1..=5)],
    };

    while digits.len() < CARD_LENGTH - 1 {
        digits.push(rng.gen_range(0..=9));
    }
    digits.push(check_digit(&digits));

    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

// Luhn check digit for a payload that does not yet include it
fn check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| luhn_term(d, i % 2 == 0))
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn luhn_term(digit: u8, doubled: bool) -> u32 {
    let d = digit as u32;
    if !doubled {
        return d;
    }
    let twice = d * 2;
    if twice > 9 {
        twice - 9
    } else {
        twice
    }
}

#[cfg(test)]
pub fn luhn_valid(number: &str) -> bool {
    let digits: Option<Vec<u8>> = number
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    match digits {
        Some(digits) if !digits.is_empty() => {
            let sum: u32 = digits
                .iter()
                .rev()
                .enumerate()
                .map(|(i, &d)| luhn_term(d, i % 2 == 1))
                .sum();
            sum % 10 == 0
        }
        _ => false,
    }
}
