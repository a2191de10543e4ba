//! Billing lines (TUSS procedure items) and money helpers.
//!
//! Amounts are integer cents ([`Cents`]) so sums are exact; formatting to
//! two decimal places only happens at the edge.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::selection::Selectable;
use crate::types::Cents;
use crate::validation;

/// Currency prefix used by [`format_brl`].
pub const CURRENCY_SYMBOL: &str = "R$";

/// One procedure line in a billing guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingItem {
    /// TUSS procedure code, e.g. `"10101012"`.
    pub code: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Cents,
    #[serde(default)]
    pub selected: bool,
}

impl BillingItem {
    pub fn line_total(&self) -> Cents {
        i64::from(self.quantity) * self.unit_price
    }
}

impl Selectable for BillingItem {
    fn key(&self) -> &str {
        &self.code
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Σ `quantity × unit_price` over the selected items.
pub fn selected_total(items: &[BillingItem]) -> Cents {
    items
        .iter()
        .filter(|i| i.selected)
        .map(BillingItem::line_total)
        .sum()
}

/// Check that a guide can be submitted: at least one item selected, and
/// every selected item has a positive quantity.
pub fn validate_guide(items: &[BillingItem]) -> Result<(), CoreError> {
    let selected: Vec<&BillingItem> = items.iter().filter(|i| i.selected).collect();
    validation::require_selection(selected.len(), "procedure")?;
    if let Some(bad) = selected.iter().find(|i| i.quantity == 0) {
        return Err(CoreError::Validation(format!(
            "Procedure {} must have a quantity of at least 1",
            bad.code
        )));
    }
    Ok(())
}

/// Subtract `percent`% from `amount`, rounding the discount half-up to the
/// cent.
///
/// # Examples
///
/// ```
/// use medclinic_core::billing::apply_discount;
/// assert_eq!(apply_discount(10_000, 15).unwrap(), 8_500);
/// assert_eq!(apply_discount(999, 50).unwrap(), 499);
/// ```
pub fn apply_discount(amount: Cents, percent: u8) -> Result<Cents, CoreError> {
    if percent > 100 {
        return Err(CoreError::Validation(format!(
            "Discount of {percent}% exceeds 100%"
        )));
    }
    if amount < 0 {
        return Err(CoreError::Validation(
            "Cannot discount a negative amount".to_string(),
        ));
    }
    let discount = (amount * i64::from(percent) * 2 + 100) / 200;
    Ok(amount - discount)
}

/// Format cents as Brazilian reais, e.g. `123456` → `"R$ 1.234,56"`.
pub fn format_brl(amount: Cents) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let units = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{sign}{CURRENCY_SYMBOL} {grouped},{cents:02}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
