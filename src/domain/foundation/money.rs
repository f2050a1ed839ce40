//! Non-negative monetary amount held in minor units.
//!
//! Fees travel over the wire as decimal major units (`9.99`) but are stored
//! and compared as integer cents so that rounding happens exactly once, at
//! the boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

/// Largest accepted amount: ten billion in major units.
const MAX_CENTS: i64 = 1_000_000_000_000;

/// A non-negative amount of money in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    /// Creates an amount from minor units.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::negative("amount"));
        }
        Ok(Self { cents })
    }

    /// Creates an amount from a decimal major-unit value, rounding to the
    /// nearest cent.
    pub fn from_major(field: &str, amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::invalid_format(field, "must be a finite number"));
        }
        if amount < 0.0 {
            return Err(ValidationError::negative(field));
        }
        let cents = (amount * 100.0).round();
        if cents > MAX_CENTS as f64 {
            return Err(ValidationError::invalid_format(field, "exceeds the maximum amount"));
        }
        Ok(Self {
            cents: cents as i64,
        })
    }

    /// Returns the amount in minor units.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    fn as_major(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major("amount", amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_major_rounds_to_nearest_cent() {
        assert_eq!(Money::from_major("fee", 9.99).unwrap().cents(), 999);
        assert_eq!(Money::from_major("fee", 15.0).unwrap().cents(), 1500);
        assert_eq!(Money::from_major("fee", 0.005).unwrap().cents(), 1);
    }

    #[test]
    fn from_major_rejects_negative_and_non_finite() {
        assert!(Money::from_major("fee", -0.01).is_err());
        assert!(Money::from_major("fee", f64::NAN).is_err());
        assert!(Money::from_major("fee", f64::INFINITY).is_err());
    }

    #[test]
    fn from_major_rejects_amounts_past_the_ceiling() {
        assert!(Money::from_major("fee", 1e300).is_err());
        assert!(Money::from_major("fee", 10_000_000_000.01).is_err());
        assert_eq!(
            Money::from_major("fee", 10_000_000_000.0).unwrap().cents(),
            MAX_CENTS
        );
    }

    #[test]
    fn from_cents_rejects_negative() {
        assert!(Money::from_cents(-1).is_err());
        assert!(Money::from_cents(0).unwrap().is_zero());
    }

    #[test]
    fn serializes_as_major_units() {
        let fee = Money::from_cents(1550).unwrap();
        assert_eq!(serde_json::to_string(&fee).unwrap(), "15.5");
    }

    #[test]
    fn deserialize_rejects_negative_amount() {
        assert!(serde_json::from_str::<Money>("-3").is_err());
        assert_eq!(serde_json::from_str::<Money>("12").unwrap().cents(), 1200);
    }

    proptest! {
        #[test]
        fn major_units_convert_back_to_same_cents(cents in 0i64..10_000_000_000) {
            let money = Money::from_cents(cents).unwrap();
            let back = Money::from_major("fee", money.as_major()).unwrap();
            prop_assert_eq!(back.cents(), cents);
        }
    }
}
