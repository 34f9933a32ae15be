//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices and cart totals use [`rust_decimal::Decimal`] so that
//! money never goes through binary floating point. The storefront is a
//! Brazilian shop, so BRL is the default currency and display formatting
//! uses a comma decimal separator, e.g. `R$ 1234,56`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create a BRL price.
    #[must_use]
    pub const fn brl(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BRL)
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// The price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }

    /// Format for display, e.g. `R$ 29,90` or `$29.90`.
    #[must_use]
    pub fn display(&self) -> String {
        let digits = format_two_decimals(self.amount);
        if self.currency.decimal_comma() {
            format!("{} {}", self.currency.symbol(), digits.replace('.', ","))
        } else {
            format!("{}{digits}", self.currency.symbol())
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Render a decimal with exactly two fractional digits.
fn format_two_decimals(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let s = rounded.to_string();
    match s.find('.') {
        None => format!("{s}.00"),
        // round_dp(2) leaves at most two fractional digits
        Some(pos) if s.len() - pos - 1 == 1 => format!("{s}0"),
        Some(_) => s,
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Whether the currency conventionally uses a comma decimal separator.
    #[must_use]
    pub const fn decimal_comma(&self) -> bool {
        matches!(self, Self::BRL | Self::EUR)
    }
}
