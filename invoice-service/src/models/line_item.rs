//! Line item model for invoice-service.

use serde::{Deserialize, Serialize};

/// Which item shape a layout accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// `{ description, amount }`
    SinglePrice,
    /// `{ name, description?, quantity, price }`
    Quantity,
}

/// A validated billable entry. Amounts are always finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineItem {
    Priced {
        description: String,
        amount: f64,
    },
    Quantity {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        quantity: u32,
        price: f64,
    },
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        match self {
            LineItem::Priced { amount, .. } => *amount,
            LineItem::Quantity {
                quantity, price, ..
            } => f64::from(*quantity) * price,
        }
    }

    /// Primary text of the row: the description of a priced item, the name of
    /// a quantity item.
    pub fn label(&self) -> &str {
        match self {
            LineItem::Priced { description, .. } => description,
            LineItem::Quantity { name, .. } => name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LineItem::Priced { description, .. } => description,
            LineItem::Quantity { description, .. } => description.as_deref().unwrap_or(""),
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        match self {
            LineItem::Priced { .. } => None,
            LineItem::Quantity { quantity, .. } => Some(*quantity),
        }
    }

    pub fn unit_price(&self) -> f64 {
        match self {
            LineItem::Priced { amount, .. } => *amount,
            LineItem::Quantity { price, .. } => *price,
        }
    }
}
