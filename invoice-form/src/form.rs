//! Editable invoice form with live totals.
//!
//! Row inputs are kept as typed, like form fields. Totals shown here are a
//! preview only; the server recomputes them from the submitted items.

use chrono::{Local, NaiveDate};
use invoice_service::format::format_currency;
use invoice_service::models::{InvoiceTotals, LineItem};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_TAX_RATE: f64 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Raw text of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInput {
    Priced {
        description: String,
        amount: String,
    },
    Quantity {
        name: String,
        description: String,
        quantity: String,
        price: String,
    },
}

impl RowInput {
    pub fn priced(description: &str, amount: &str) -> Self {
        RowInput::Priced {
            description: description.to_string(),
            amount: amount.to_string(),
        }
    }

    pub fn quantity(name: &str, quantity: &str, price: &str) -> Self {
        RowInput::Quantity {
            name: name.to_string(),
            description: String::new(),
            quantity: quantity.to_string(),
            price: price.to_string(),
        }
    }

    /// The item this row describes, if every input is usable.
    pub fn to_item(&self) -> Option<LineItem> {
        match self {
            RowInput::Priced {
                description,
                amount,
            } => {
                let description = description.trim();
                let amount = parse_positive(amount)?;
                (!description.is_empty()).then(|| LineItem::Priced {
                    description: description.to_string(),
                    amount,
                })
            }
            RowInput::Quantity {
                name,
                description,
                quantity,
                price,
            } => {
                let name = name.trim();
                let quantity = parse_whole(quantity)?;
                let price = parse_positive(price)?;
                if !(f64::from(quantity) * price).is_finite() {
                    return None;
                }
                let description = Some(description.trim())
                    .filter(|d| !d.is_empty())
                    .map(str::to_string);
                (!name.is_empty()).then(|| LineItem::Quantity {
                    name: name.to_string(),
                    description,
                    quantity,
                    price,
                })
            }
        }
    }
}

fn parse_positive(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Any positive number without a fractional part, so `3.0` and `1e1` count.
fn parse_whole(input: &str) -> Option<u32> {
    parse_positive(input)
        .filter(|n| n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub input: RowInput,
}

/// Formatted totals for display next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Rows that will be submitted.
    pub item_count: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a customer name.")]
    MissingCustomerName,

    #[error("Please add at least one valid item.")]
    NoValidItems,

    #[error("No such row: {0}")]
    UnknownRow(RowId),
}

/// JSON body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub customer_name: String,
    pub items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub date: String,
    pub currency: String,
    pub locale: String,
}

#[derive(Debug, Clone)]
pub struct InvoiceForm {
    pub customer_name: String,
    pub invoice_number: String,
    /// `YYYY-MM-DD`; blank means today.
    pub date: String,
    pub currency: String,
    pub locale: String,
    /// Layout preset to request; `None` uses the server default.
    pub layout: Option<String>,
    pub tax_rate: f64,
    rows: Vec<Row>,
    next_id: u64,
    totals: TotalsDisplay,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        let mut form = InvoiceForm {
            customer_name: String::new(),
            invoice_number: String::new(),
            date: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            layout: None,
            tax_rate: DEFAULT_TAX_RATE,
            rows: Vec::new(),
            next_id: 0,
            totals: TotalsDisplay::default(),
        };
        form.recompute_totals();
        form
    }
}

impl InvoiceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn totals(&self) -> &TotalsDisplay {
        &self.totals
    }

    fn push_row(&mut self, input: RowInput) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row { id, input });
        self.recompute_totals();
        id
    }

    /// Append a single-price row.
    pub fn add_row(&mut self, description: Option<&str>, amount: Option<&str>) -> RowId {
        self.push_row(RowInput::priced(
            description.unwrap_or_default(),
            amount.unwrap_or_default(),
        ))
    }

    /// Append a row for quantity layouts.
    pub fn add_quantity_row(
        &mut self,
        name: Option<&str>,
        quantity: Option<&str>,
        price: Option<&str>,
    ) -> RowId {
        self.push_row(RowInput::quantity(
            name.unwrap_or_default(),
            quantity.unwrap_or_default(),
            price.unwrap_or_default(),
        ))
    }

    /// Replace a row's inputs, as on every keystroke.
    pub fn update_row(&mut self, id: RowId, input: RowInput) -> Result<(), FormError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(FormError::UnknownRow(id))?;
        row.input = input;
        self.recompute_totals();
        Ok(())
    }

    /// Returns `false` if the row was already gone.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        let removed = self.rows.len() != before;
        if removed {
            self.recompute_totals();
        }
        removed
    }

    /// Rows that parse to a submittable item, in form order.
    pub fn valid_items(&self) -> Vec<LineItem> {
        self.rows.iter().filter_map(|row| row.input.to_item()).collect()
    }

    fn display_currency(&self) -> &str {
        let currency = self.currency.trim();
        if currency.is_empty() {
            DEFAULT_CURRENCY
        } else {
            currency
        }
    }

    fn display_locale(&self) -> &str {
        let locale = self.locale.trim();
        if locale.is_empty() {
            DEFAULT_LOCALE
        } else {
            locale
        }
    }

    pub fn recompute_totals(&mut self) -> &TotalsDisplay {
        let items = self.valid_items();
        let totals = InvoiceTotals::compute(items.iter().map(LineItem::amount), self.tax_rate);
        let money = |amount: f64| {
            format_currency(amount, self.display_currency(), self.display_locale())
        };

        self.totals = TotalsDisplay {
            subtotal: money(totals.subtotal),
            tax: money(totals.tax),
            total: money(totals.total),
            item_count: items.len(),
        };
        &self.totals
    }

    pub fn build_payload(&self) -> Result<InvoicePayload, FormError> {
        self.build_payload_on(Local::now().date_naive())
    }

    /// Same as [`InvoiceForm::build_payload`] with an explicit "today".
    pub fn build_payload_on(&self, today: NaiveDate) -> Result<InvoicePayload, FormError> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(FormError::MissingCustomerName);
        }
        let items = self.valid_items();
        if items.is_empty() {
            return Err(FormError::NoValidItems);
        }

        let invoice_number = Some(self.invoice_number.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let date = match self.date.trim() {
            "" => today.format("%Y-%m-%d").to_string(),
            date => date.to_string(),
        };

        Ok(InvoicePayload {
            customer_name: customer_name.to_string(),
            items,
            invoice_number,
            date,
            currency: self.display_currency().to_ascii_uppercase(),
            locale: self.display_locale().to_string(),
        })
    }
}
