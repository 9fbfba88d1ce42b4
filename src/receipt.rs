//! Checkout Summary

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::{Cart, CartTotals};

/// Errors that can occur when rendering a checkout summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One rendered cart line.
#[derive(Debug, Clone)]
struct SummaryLine<'a> {
    name: String,
    kind: &'static str,
    quantity: i64,
    unit_price: Money<'a, Currency>,
    line_total: Money<'a, Currency>,
}

/// Checkout summary for a cart: line rows plus the derived totals block.
///
/// Every amount comes from the cart's derived accessors; the summary never
/// recomputes pricing, so there is no second shipping calculation to drift.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    lines: Vec<SummaryLine<'a>>,
    totals: CartTotals<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Builds a summary from the cart's current state.
    #[must_use]
    pub fn from_cart(cart: &Cart<'a>) -> Self {
        let lines = cart
            .iter()
            .map(|line| SummaryLine {
                name: line.details().name.clone(),
                kind: line.details().kind.label(),
                quantity: line.quantity(),
                unit_price: *line.unit_price(),
                line_total: line.line_total(),
            })
            .collect();

        Self {
            lines,
            totals: cart.totals(),
        }
    }

    /// The derived totals this summary renders.
    #[must_use]
    pub fn totals(&self) -> &CartTotals<'a> {
        &self.totals
    }

    /// Renders the summary table and totals block.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.lines.is_empty() {
            writeln!(out, "\nYour cart is empty.").map_err(|_err| SummaryError::IO)?;

            return self.write_totals(&mut out);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Kind", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.kind.to_string(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let shipping_display = if self.totals.item_count > 0
            && self.totals.shipping.to_minor_units() == 0
        {
            "FREE".to_string()
        } else {
            format!("{}", self.totals.shipping)
        };

        let rows = [
            ("Items:", self.totals.item_count.to_string()),
            ("Subtotal:", format!("{}", self.totals.subtotal)),
            ("Shipping:", shipping_display),
            ("Total:", format!("{}", self.totals.grand_total)),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")
                .map_err(|_err| SummaryError::IO)?;
        }

        writeln!(out).map_err(|_err| SummaryError::IO)
    }
}
