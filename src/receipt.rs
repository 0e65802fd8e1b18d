//! Receipt
//!
//! Text rendering of a placed order for terminals and logs.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{pricing::line_total, status::OrderStatus};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount cannot be expressed in the currency's minor units.
    #[error("amount {0} cannot be represented in minor units")]
    Unrepresentable(Decimal),

    /// Writing to the output failed.
    #[error("IO error")]
    IO,
}

/// One purchased product on a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine<'a> {
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl ReceiptLine<'_> {
    /// Product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units purchased.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Receipt for a single order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    reference: String,
    status: OrderStatus,
    lines: Vec<ReceiptLine<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from `(name, quantity, price_at_purchase)` lines and the recorded order
    /// total.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Unrepresentable`] if an amount overflows the currency's minor
    /// units.
    pub fn new<I, S>(
        reference: impl Into<String>,
        status: OrderStatus,
        lines: I,
        total: Decimal,
        currency: &'a Currency,
    ) -> Result<Self, ReceiptError>
    where
        I: IntoIterator<Item = (S, u32, Decimal)>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|(name, quantity, unit_price)| {
                Ok(ReceiptLine {
                    name: name.into(),
                    quantity,
                    unit_price: to_money(unit_price, currency)?,
                    total: to_money(line_total(quantity, unit_price), currency)?,
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        Ok(Receipt {
            reference: reference.into(),
            status,
            lines,
            total: to_money(total, currency)?,
        })
    }

    /// Purchased lines in order.
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Recorded order total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Write the receipt as a table followed by the order total.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\nOrder {} ({})", self.reference, self.status)
            .and_then(|()| writeln!(out, "{table}"))
            .and_then(|()| writeln!(out, " Total: {}", self.total))
            .map_err(|_err| ReceiptError::IO)
    }
}

/// Convert a decimal amount to money, rounding to the currency's minor units.
///
/// # Errors
///
/// Returns [`ReceiptError::Unrepresentable`] if the amount does not fit in `i64` minor units.
pub fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, ReceiptError> {
    let mut minor = amount.round_dp(currency.exponent);

    minor.rescale(currency.exponent);

    let minor_units =
        i64::try_from(minor.mantissa()).map_err(|_overflow| ReceiptError::Unrepresentable(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}
