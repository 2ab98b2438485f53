//! Request validation. Every problem is collected so the client can show
//! them all at once.

use crate::layout::LayoutConfig;
use crate::models::{InvoiceRequest, InvoiceTotals, ItemKind, LineItem, NormalizedInvoice};
use serde_json::Value;
use service_core::error::AppError;

const DEFAULT_LOCALE: &str = "en-US";

/// Outcome of [`validate`]. The payload is acceptable iff `errors` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub errors: Vec<String>,
    pub data: NormalizedInvoice,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<NormalizedInvoice, AppError> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(AppError::ValidationFailed(self.errors))
        }
    }
}

/// Trimmed text, or empty for anything that is not a JSON string.
fn text(value: &Value) -> String {
    value.as_str().map(str::trim).unwrap_or_default().to_string()
}

fn optional_text(value: &Value) -> Option<String> {
    Some(text(value)).filter(|s| !s.is_empty())
}

/// JSON numbers as-is, numeric strings after trimming. Booleans and
/// everything else are not numbers.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn positive(value: &Value) -> Option<f64> {
    number(value).filter(|n| n.is_finite() && *n > 0.0)
}

fn whole_quantity(value: &Value) -> Option<u32> {
    positive(value)
        .filter(|n| n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

fn priced_item(item: &Value) -> Option<LineItem> {
    let description = text(&item["description"]);
    let amount = positive(&item["amount"])?;
    (!description.is_empty()).then_some(LineItem::Priced {
        description,
        amount,
    })
}

fn quantity_item(item: &Value) -> Option<LineItem> {
    let name = text(&item["name"]);
    let quantity = whole_quantity(&item["quantity"])?;
    let price = positive(&item["price"])?;
    // quantity * price can still overflow to infinity
    let finite = (f64::from(quantity) * price).is_finite();
    (!name.is_empty() && finite).then(|| LineItem::Quantity {
        name,
        description: optional_text(&item["description"]),
        quantity,
        price,
    })
}

fn item_error(index: usize, kind: ItemKind) -> String {
    match kind {
        ItemKind::SinglePrice => {
            format!("items[{}] must have description and positive amount", index)
        }
        ItemKind::Quantity => format!(
            "items[{}] must have name, positive whole quantity and positive price",
            index
        ),
    }
}

/// Check `request` against the item shape of `layout` and normalize it.
pub fn validate(request: &InvoiceRequest, layout: &LayoutConfig) -> Validation {
    let mut errors = Vec::new();

    let customer_name = text(&request.customer_name);
    if customer_name.is_empty() {
        errors.push("customerName is required".to_string());
    }

    let mut items = Vec::new();
    match request.items.as_array() {
        Some(raw) if !raw.is_empty() => {
            for (index, item) in raw.iter().enumerate() {
                let parsed = match layout.item_kind {
                    ItemKind::SinglePrice => priced_item(item),
                    ItemKind::Quantity => quantity_item(item),
                };
                match parsed {
                    Some(item) => items.push(item),
                    None => errors.push(item_error(index, layout.item_kind)),
                }
            }
        }
        _ => errors.push("items must contain at least one item".to_string()),
    }

    if !items.is_empty()
        && !InvoiceTotals::compute(items.iter().map(LineItem::amount), layout.tax_rate).is_finite()
    {
        errors.push("items total must be a finite amount".to_string());
    }

    let data = NormalizedInvoice {
        customer_name,
        items,
        invoice_number: text(&request.invoice_number),
        date: optional_text(&request.date),
        currency: optional_text(&request.currency)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| layout.currency.clone()),
        locale: optional_text(&request.locale).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
    };

    Validation { errors, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> InvoiceRequest {
        serde_json::from_value(body).expect("request deserializes")
    }

    #[test]
    fn valid_request_keeps_every_item() {
        let validation = validate(
            &request(json!({
                "customerName": "  Acme Corp ",
                "items": [
                    {"description": "Widget", "amount": 10},
                    {"description": "Gadget", "amount": "5.50"}
                ]
            })),
            &LayoutConfig::standard(),
        );

        assert!(validation.is_valid(), "{:?}", validation.errors);
        assert_eq!(validation.data.customer_name, "Acme Corp");
        assert_eq!(validation.data.items.len(), 2);
        assert_eq!(validation.data.items[1].amount(), 5.5);
        assert_eq!(validation.data.currency, "USD");
        assert_eq!(validation.data.locale, "en-US");
        assert_eq!(validation.data.invoice_number, "");
        assert_eq!(validation.data.date, None);
    }

    #[test]
    fn missing_customer_and_items_are_both_reported() {
        let validation = validate(&request(json!({})), &LayoutConfig::standard());
        assert_eq!(
            validation.errors,
            vec![
                "customerName is required".to_string(),
                "items must contain at least one item".to_string()
            ]
        );
    }

    #[test]
    fn non_string_customer_counts_as_empty() {
        let validation = validate(
            &request(json!({"customerName": 42, "items": [{"description": "A", "amount": 1}]})),
            &LayoutConfig::standard(),
        );
        assert_eq!(validation.errors, vec!["customerName is required".to_string()]);
    }

    #[test]
    fn invalid_items_are_reported_by_index_and_dropped() {
        let validation = validate(
            &request(json!({
                "customerName": "Acme",
                "items": [
                    {"description": "Widget", "amount": 10},
                    {"description": "   ", "amount": 3},
                    {"description": "Free", "amount": 0},
                    {"description": "Flag", "amount": true},
                    "not an object",
                    {"description": "Bolt", "amount": " 2 "}
                ]
            })),
            &LayoutConfig::standard(),
        );

        assert_eq!(
            validation.errors,
            (1..=4)
                .map(|i| format!("items[{}] must have description and positive amount", i))
                .collect::<Vec<_>>()
        );
        let labels: Vec<&str> = validation.data.items.iter().map(LineItem::label).collect();
        assert_eq!(labels, ["Widget", "Bolt"]);
    }

    #[test]
    fn items_that_are_not_a_list_are_missing() {
        let validation = validate(
            &request(json!({"customerName": "Acme", "items": {"description": "Widget"}})),
            &LayoutConfig::standard(),
        );
        assert_eq!(validation.errors, vec!["items must contain at least one item".to_string()]);
    }

    #[test]
    fn quantity_layout_requires_whole_positive_quantity() {
        let validation = validate(
            &request(json!({
                "customerName": "Acme",
                "items": [
                    {"name": "Bolt", "quantity": 3, "price": 2.5, "description": "M6"},
                    {"name": "Nut", "quantity": 1.5, "price": 1},
                    {"name": "Washer", "quantity": "4", "price": "0.10"},
                    {"description": "no name", "quantity": 1, "price": 1}
                ]
            })),
            &LayoutConfig::itemized(),
        );

        assert_eq!(
            validation.errors,
            vec![
                "items[1] must have name, positive whole quantity and positive price".to_string(),
                "items[3] must have name, positive whole quantity and positive price".to_string(),
            ]
        );
        assert_eq!(validation.data.items.len(), 2);
        assert_eq!(validation.data.items[0].amount(), 7.5);
        assert_eq!(validation.data.items[0].description(), "M6");
        assert_eq!(validation.data.items[1].quantity(), Some(4));
    }

    #[test]
    fn overflowing_items_total_is_rejected() {
        let validation = validate(
            &request(json!({
                "customerName": "Acme",
                "items": [
                    {"description": "A", "amount": 1e308},
                    {"description": "B", "amount": 1e308}
                ]
            })),
            &LayoutConfig::standard(),
        );
        assert_eq!(validation.errors, vec!["items total must be a finite amount".to_string()]);
    }

    #[test]
    fn optional_fields_are_trimmed_and_defaulted() {
        let validation = validate(
            &request(json!({
                "customerName": "Acme",
                "items": [{"description": "Widget", "amount": 10}],
                "invoiceNumber": " INV-7 ",
                "date": "2024-01-15",
                "currency": "inr",
                "locale": "en-IN"
            })),
            &LayoutConfig::standard(),
        );

        assert_eq!(validation.data.invoice_number, "INV-7");
        assert_eq!(validation.data.date.as_deref(), Some("2024-01-15"));
        assert_eq!(validation.data.currency, "INR");
        assert_eq!(validation.data.locale, "en-IN");
    }

    #[test]
    fn into_result_maps_errors_to_validation_failure() {
        let validation = validate(&request(json!({"customerName": ""})), &LayoutConfig::standard());
        assert!(matches!(
            validation.into_result(),
            Err(AppError::ValidationFailed(errors)) if errors.len() == 2
        ));
    }
}
