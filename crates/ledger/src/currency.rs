//! Currency descriptor: decimal <-> minor-unit conversion and display.
//!
//! The bridge never assumes a scale; every conversion goes through here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::store::{LedgerError, LedgerResult};

/// Upper bound for configurable fractional digits.
pub const MAX_FRACTIONAL_DIGITS: u32 = 8;

pub trait Currency: Send + Sync {
    fn fractional_digits(&self) -> u32;

    /// Integer minor units for `amount`, rounded half away from zero.
    fn minor_units_of(&self, amount: Decimal) -> LedgerResult<i64>;

    /// Display value of `minor_units`.
    fn decimal_of(&self, minor_units: i64) -> Decimal;

    fn format(&self, amount: Decimal) -> String;

    fn name_singular(&self) -> &str;

    fn name_plural(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct CurrencyDescriptor {
    name_singular: String,
    name_plural: String,
    fractional_digits: u32,
}

impl CurrencyDescriptor {
    pub fn new(
        name_singular: impl Into<String>,
        name_plural: impl Into<String>,
        fractional_digits: u32,
    ) -> LedgerResult<Self> {
        if fractional_digits > MAX_FRACTIONAL_DIGITS {
            return Err(LedgerError::InvalidAmount(format!(
                "fractional digits must be at most {MAX_FRACTIONAL_DIGITS}, got {fractional_digits}"
            )));
        }
        Ok(Self {
            name_singular: name_singular.into(),
            name_plural: name_plural.into(),
            fractional_digits,
        })
    }

    fn unit(&self) -> Decimal {
        Decimal::from(10i64.pow(self.fractional_digits))
    }
}

/// Unchecked wire shape; deserialization goes through [`CurrencyDescriptor::new`].
#[derive(Deserialize)]
struct RawDescriptor {
    name_singular: String,
    name_plural: String,
    fractional_digits: u32,
}

impl TryFrom<RawDescriptor> for CurrencyDescriptor {
    type Error = LedgerError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Self::new(raw.name_singular, raw.name_plural, raw.fractional_digits)
    }
}

impl Default for CurrencyDescriptor {
    fn default() -> Self {
        Self {
            name_singular: "Emerald".to_string(),
            name_plural: "Emeralds".to_string(),
            fractional_digits: 2,
        }
    }
}

impl Currency for CurrencyDescriptor {
    fn fractional_digits(&self) -> u32 {
        self.fractional_digits
    }

    fn minor_units_of(&self, amount: Decimal) -> LedgerResult<i64> {
        amount
            .round_dp_with_strategy(self.fractional_digits, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(self.unit())
            .and_then(|scaled| scaled.to_i64())
            .ok_or(LedgerError::Overflow)
    }

    fn decimal_of(&self, minor_units: i64) -> Decimal {
        Decimal::new(minor_units, self.fractional_digits)
    }

    fn format(&self, amount: Decimal) -> String {
        let mut shown = amount
            .round_dp_with_strategy(self.fractional_digits, RoundingStrategy::MidpointAwayFromZero);
        shown.rescale(self.fractional_digits);
        let name = if shown == Decimal::ONE {
            &self.name_singular
        } else {
            &self.name_plural
        };
        format!("{shown} {name}")
    }

    fn name_singular(&self) -> &str {
        &self.name_singular
    }

    fn name_plural(&self) -> &str {
        &self.name_plural
    }
}
