//! Pricing
//!
//! Amounts are Pakistani rupees. Line prices are kept as decimals; totals are computed in
//! minor units through `rusty_money` so that currency arithmetic is checked.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

use crate::items::CartLineItem;

/// Prefix printed before formatted amounts.
pub const CURRENCY_PREFIX: &str = "Rs.";

const MINOR_UNITS: Decimal = Decimal::ONE_HUNDRED;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    /// A line total overflowed.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Currency every amount in the store is expressed in.
pub fn currency() -> &'static iso::Currency {
    iso::PKR
}

/// Converts a decimal amount to money, rounding to the nearest minor unit.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] when the amount does not fit in minor units.
pub fn to_money(amount: Decimal) -> Result<Money<'static, iso::Currency>, PricingError> {
    let minor = amount
        .checked_mul(MINOR_UNITS)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or(PricingError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency()))
}

/// Converts money back into a decimal amount.
pub fn to_decimal(money: &Money<'_, iso::Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), 2)
}

/// Calculates the total price of a list of cart lines from their captured prices.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total overflowed.
/// - [`PricingError::OutOfRange`]: a line total does not fit in minor units.
/// - [`PricingError::Money`]: wrapped money arithmetic error.
pub fn total_price(items: &[CartLineItem]) -> Result<Money<'static, iso::Currency>, PricingError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency()), |acc, item| {
            let line = to_money(item.line_total().ok_or(PricingError::Overflow)?)?;

            Ok(acc.add(line)?)
        })
}

/// Formats an amount for display.
///
/// Whole amounts render without decimals or grouping (`Rs. 1500`); fractional amounts render
/// with thousands separators and exactly two decimals (`Rs. 1,500.50`).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();

    if magnitude.fract().is_zero() {
        return format!("{sign}{CURRENCY_PREFIX} {}", magnitude.trunc().normalize());
    }

    let fixed = format!("{magnitude:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{sign}{CURRENCY_PREFIX} {}.{fraction}",
        group_thousands(whole)
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    grouped
}
