//! Invoice layouts: which columns, currency, tax rate, colors and page
//! geometry a rendered invoice uses.
//!
//! One renderer serves every layout.

mod geometry;
mod pagination;
mod theme;

pub use geometry::PageGeometry;
pub use pagination::{page_capacity, paginate, PagePlan};
pub use theme::{Rgb, Theme, Typography};

use crate::format::format_percent;
use crate::models::{ItemKind, LineItem};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// What a table column shows for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue {
    Label,
    Description,
    Quantity,
    UnitPrice,
    Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    /// Share of the table width. The last column takes whatever is left.
    pub ratio: f32,
    pub align: Align,
    pub value: ColumnValue,
}

impl Column {
    pub fn new(title: &str, ratio: f32, align: Align, value: ColumnValue) -> Self {
        Column {
            title: title.to_string(),
            ratio,
            align,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub name: String,
    pub item_kind: ItemKind,
    pub columns: Vec<Column>,
    /// Used when the request names no currency.
    pub currency: String,
    pub tax_rate: f64,
    pub theme: Theme,
    pub typography: Typography,
    pub geometry: PageGeometry,
}

impl LayoutConfig {
    /// Description and amount on a blue header band.
    pub fn standard() -> Self {
        LayoutConfig {
            name: "standard".to_string(),
            item_kind: ItemKind::SinglePrice,
            columns: vec![
                Column::new("Description", 0.65, Align::Left, ColumnValue::Label),
                Column::new("Amount", 0.35, Align::Right, ColumnValue::Amount),
            ],
            currency: "USD".to_string(),
            tax_rate: 0.18,
            theme: Theme::blue(),
            typography: Typography::default(),
            geometry: PageGeometry::a4(),
        }
    }

    /// Named items with quantity and unit price.
    pub fn itemized() -> Self {
        LayoutConfig {
            name: "itemized".to_string(),
            item_kind: ItemKind::Quantity,
            columns: vec![
                Column::new("Item", 0.28, Align::Left, ColumnValue::Label),
                Column::new("Description", 0.30, Align::Left, ColumnValue::Description),
                Column::new("Qty", 0.10, Align::Right, ColumnValue::Quantity),
                Column::new("Unit Price", 0.16, Align::Right, ColumnValue::UnitPrice),
                Column::new("Amount", 0.16, Align::Right, ColumnValue::Amount),
            ],
            currency: "USD".to_string(),
            tax_rate: 0.18,
            theme: Theme::teal(),
            typography: Typography::default(),
            geometry: PageGeometry::a4(),
        }
    }

    /// Standard columns with tighter rows and muted colors.
    pub fn compact() -> Self {
        LayoutConfig {
            name: "compact".to_string(),
            columns: vec![
                Column::new("Description", 0.70, Align::Left, ColumnValue::Label),
                Column::new("Amount", 0.30, Align::Right, ColumnValue::Amount),
            ],
            theme: Theme::slate(),
            typography: Typography::compact(),
            geometry: PageGeometry::a4_compact(),
            ..LayoutConfig::standard()
        }
    }

    /// Column widths in points, floored except for the last column.
    pub fn column_widths(&self) -> Vec<f32> {
        let table_width = self.geometry.table_width();
        let mut widths: Vec<f32> = self
            .columns
            .iter()
            .map(|c| (table_width * c.ratio).floor())
            .collect();
        if let Some((last, others)) = widths.split_last_mut() {
            *last = table_width - others.iter().sum::<f32>();
        }
        widths
    }

    /// Left edge of each column.
    pub fn column_offsets(&self) -> Vec<f32> {
        let mut x = self.geometry.table_left();
        self.column_widths()
            .into_iter()
            .map(|w| {
                let left = x;
                x += w;
                left
            })
            .collect()
    }

    pub fn tax_label(&self) -> String {
        format!("Tax ({})", format_percent(self.tax_rate))
    }

    /// Cell text for `item` in a column. Money columns are left to the caller,
    /// which knows the currency.
    pub fn cell_text(&self, value: ColumnValue, item: &LineItem) -> Option<String> {
        match value {
            ColumnValue::Label => Some(item.label().to_string()),
            ColumnValue::Description => Some(item.description().to_string()),
            ColumnValue::Quantity => Some(item.quantity().map(|q| q.to_string()).unwrap_or_default()),
            ColumnValue::UnitPrice | ColumnValue::Amount => None,
        }
    }
}

/// Public description of a layout for `GET /layouts`.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    pub name: String,
    pub item_kind: ItemKind,
    pub currency: String,
    pub tax_rate: f64,
    pub columns: Vec<String>,
    pub accent: Rgb,
    pub is_default: bool,
}

/// Layouts addressable by name, plus the one used by `POST /generate`.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, Arc<LayoutConfig>>,
    default_name: String,
}

impl LayoutRegistry {
    /// The built-in presets. Returns `None` if `default_name` is not one of them.
    pub fn builtin(default_name: &str) -> Option<Self> {
        Self::new(
            [
                LayoutConfig::standard(),
                LayoutConfig::itemized(),
                LayoutConfig::compact(),
            ],
            default_name,
        )
    }

    pub fn new<I>(layouts: I, default_name: &str) -> Option<Self>
    where
        I: IntoIterator<Item = LayoutConfig>,
    {
        let layouts: BTreeMap<String, Arc<LayoutConfig>> = layouts
            .into_iter()
            .map(|layout| (layout.name.clone(), Arc::new(layout)))
            .collect();

        let default_name = default_name.trim().to_ascii_lowercase();
        if !layouts.contains_key(&default_name) {
            return None;
        }

        Some(Self {
            layouts,
            default_name,
        })
    }

    pub fn get(&self, name: &str) -> Option<Arc<LayoutConfig>> {
        self.layouts.get(&name.trim().to_ascii_lowercase()).cloned()
    }

    pub fn default_layout(&self) -> Arc<LayoutConfig> {
        // Presence is checked in `new`.
        self.layouts[&self.default_name].clone()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn summaries(&self) -> Vec<LayoutSummary> {
        self.layouts
            .values()
            .map(|layout| LayoutSummary {
                name: layout.name.clone(),
                item_kind: layout.item_kind,
                currency: layout.currency.clone(),
                tax_rate: layout.tax_rate,
                columns: layout.columns.iter().map(|c| c.title.clone()).collect(),
                accent: layout.theme.header_fill,
                is_default: layout.name == self.default_name,
            })
            .collect()
    }
}
