use std::fmt;
use std::fmt::Formatter;
use std::ops::{Add, Sub};
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{de, Deserializer, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::Error::{Malformed, NoInput, OutOfRange, PrecisionTooHigh};

const SCALE: i64 = 10_000;
const FRACTION_DIGITS: usize = 4;

/// fixed point precision with 4 fraction digits, to act as monetary type
/// NB: only the operators + and - are implemented, and both saturate at the i64 bounds
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Amount {
    amount_fx4: i64,
}

lazy_static! {
    pub static ref ZERO: Amount = Amount::new(0, 0);
}

impl Amount {
    pub(crate) fn new(whole: i64, fraction: u32) -> Amount {
        let whole_fx4 = whole.saturating_mul(SCALE);
        return if whole >= 0 {
            Amount { amount_fx4: whole_fx4.saturating_add(fraction as i64) }
        } else {
            Amount { amount_fx4: whole_fx4.saturating_sub(fraction as i64) }
        };
    }

    fn checked(negative: bool, whole: i64, fraction: u32) -> Option<Amount> {
        let magnitude = whole.checked_mul(SCALE)?.checked_add(fraction as i64)?;
        let amount_fx4 = if negative { -magnitude } else { magnitude };
        Some(Amount { amount_fx4 })
    }

    /// `None` when the exact sum does not fit, where `+` would saturate.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.amount_fx4.checked_add(rhs.amount_fx4).map(|amount_fx4| Amount { amount_fx4 })
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount { amount_fx4: self.amount_fx4.saturating_add(rhs.amount_fx4) }
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount { amount_fx4: self.amount_fx4.saturating_sub(rhs.amount_fx4) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no amount given")]
    NoInput,
    #[error("malformed amount {0:?}")]
    Malformed(String),
    #[error("amount {0:?} has more than 4 decimal places")]
    PrecisionTooHigh(String),
    #[error("amount {0:?} is out of range")]
    OutOfRange(String),
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NoInput);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => { (true, rest) }
            None => { (false, trimmed.strip_prefix('+').unwrap_or(trimmed)) }
        };

        let mut split_input = unsigned.split('.');
        let whole_str = split_input.next().ok_or(NoInput)?;
        let fraction_str_opt = split_input.next();
        if split_input.next().is_some() || !all_digits(whole_str) {
            return Err(Malformed(s.to_string()));
        }

        let whole: i64 = match (whole_str.is_empty(), fraction_str_opt) {
            (true, None) => { return Err(Malformed(s.to_string())); }
            (true, Some(_)) => { 0 }
            // digits only at this point, so the only way to fail is overflow
            (false, _) => { whole_str.parse().map_err(|_| OutOfRange(s.to_string()))? }
        };

        let fraction: u32 = match fraction_str_opt {
            None => { 0 }
            Some(fraction_str) => {
                let fraction_len = fraction_str.len();
                if !all_digits(fraction_str) {
                    return Err(Malformed(s.to_string()));
                }
                match fraction_len {
                    0 => { return Err(Malformed(s.to_string())); }
                    1..=FRACTION_DIGITS => {
                        let parsed: u32 = fraction_str.parse().map_err(|_| Malformed(s.to_string()))?;
                        parsed * 10_u32.pow((FRACTION_DIGITS - fraction_len) as u32)
                    }
                    _ => { return Err(PrecisionTooHigh(s.to_string())); }
                }
            }
        };

        Amount::checked(negative, whole, fraction).ok_or_else(|| OutOfRange(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.amount_fx4 < 0 {
            write!(f, "-")?;
        }
        let magnitude = self.amount_fx4.unsigned_abs();
        let whole = magnitude / SCALE as u64;
        let mut fraction = magnitude % SCALE as u64;

        if fraction == 0 {
            write!(f, "{}", whole)
        } else {
            let mut width = FRACTION_DIGITS;
            // get rid of 'ending zeroes'; this is a fraction after all
            while fraction % 10 == 0 {
                fraction = fraction / 10;
                width = width - 1;
            }
            write!(f, "{}.{:0width$}", whole, fraction)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use crate::amount::{Amount, Error, ZERO};

    #[test]
    fn parse_balance() {
        let balance: Amount = "10250.75".parse().unwrap();
        assert_eq!(balance.amount_fx4, 102507500);
        assert_eq!(balance.to_string(), "10250.75");

        let overdrawn: Amount = "-40.5".parse().unwrap();
        assert_eq!(overdrawn.amount_fx4, -405000);
        assert_eq!(overdrawn.to_string(), "-40.5");
    }

    #[test]
    fn negative_below_one() {
        let amount: Amount = "-0.25".parse().unwrap();
        assert_eq!(amount.amount_fx4, -2500);
        assert_eq!(amount.to_string(), "-0.25");
        assert!(amount < *ZERO);
    }

    #[test]
    fn new_from_parts() {
        let deposit = Amount::new(10000, 5);
        assert_eq!(deposit.amount_fx4, 100000005);
        assert_eq!(deposit.to_string(), "10000.0005");

        let debit = Amount::new(-3, 2500);
        assert_eq!(debit.amount_fx4, -32500);
        assert_eq!(debit.to_string(), "-3.25");
    }

    #[rstest]
    #[case("10000", 100_000_000)]
    #[case(" 500 ", 5_000_000)]
    #[case("+7", 70_000)]
    #[case(".5", 5_000)]
    #[case("9.05", 90_500)]
    #[case("0.0001", 1)]
    #[case("0", 0)]
    fn parse_accepts(#[case] input: &str, #[case] expected_fx4: i64) {
        assert_eq!(Amount::from_str(input).unwrap().amount_fx4, expected_fx4);
    }

    #[rstest]
    #[case("", Error::NoInput)]
    #[case("   ", Error::NoInput)]
    #[case("abc", Error::Malformed("abc".to_string()))]
    #[case("1.", Error::Malformed("1.".to_string()))]
    #[case("1.2.3", Error::Malformed("1.2.3".to_string()))]
    #[case("1.+5", Error::Malformed("1.+5".to_string()))]
    #[case("-", Error::Malformed("-".to_string()))]
    #[case("1e3", Error::Malformed("1e3".to_string()))]
    #[case("NaN", Error::Malformed("NaN".to_string()))]
    #[case("1.23456", Error::PrecisionTooHigh("1.23456".to_string()))]
    #[case("99999999999999999999", Error::OutOfRange("99999999999999999999".to_string()))]
    #[case("922337203685478", Error::OutOfRange("922337203685478".to_string()))]
    fn parse_rejects(#[case] input: &str, #[case] expected: Error) {
        assert_eq!(Amount::from_str(input).unwrap_err(), expected);
    }

    #[test]
    fn deposit_onto_balance() {
        let balance = Amount::from_str("10000").unwrap();
        let deposit = Amount::from_str("499.99").unwrap();
        assert_eq!((balance + deposit).to_string(), "10499.99");
    }

    #[test]
    fn withdraw_from_balance() {
        let balance = Amount::from_str("10499.99").unwrap();
        let withdrawal = Amount::from_str("0.99").unwrap();
        assert_eq!((balance - withdrawal).to_string(), "10499");
    }

    #[test]
    fn sub_to_zero() {
        let balance = Amount::from_str("10500").unwrap();
        assert_eq!(balance - balance, *ZERO);
        assert_eq!((balance - balance).to_string(), "0");
    }

    #[test]
    fn add_saturates() {
        let max = Amount { amount_fx4: i64::MAX };
        let one = Amount::from_str("1").unwrap();
        assert_eq!((max + one).amount_fx4, i64::MAX);
    }

    #[test]
    fn checked_add_reports_overflow() {
        let balance = Amount::from_str("10000").unwrap();
        let deposit = Amount::from_str("922337203685477").unwrap();
        assert_eq!(balance.checked_add(deposit), None);
        assert_eq!(balance.checked_add(balance), Some(Amount::from_str("20000").unwrap()));
    }

    #[test]
    fn serde_uses_display_form() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(("balance", Amount::from_str("12.50").unwrap())).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "balance,12.5\n");
    }
}
