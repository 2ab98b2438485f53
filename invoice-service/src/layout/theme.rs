use serde::{Serialize, Serializer};
use std::fmt;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colors of every painted element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub table_header_fill: Rgb,
    pub table_header_text: Rgb,
    pub header_rule: Rgb,
    pub row_rule: Rgb,
    pub body_text: Rgb,
    pub footer_rule: Rgb,
    pub footer_text: Rgb,
}

impl Theme {
    pub const fn blue() -> Self {
        Theme {
            header_fill: Rgb::hex(0x0d47a1),
            header_text: Rgb::hex(0xffffff),
            table_header_fill: Rgb::hex(0xf1f5f9),
            table_header_text: Rgb::hex(0x0f172a),
            header_rule: Rgb::hex(0xcbd5e1),
            row_rule: Rgb::hex(0xeef2f7),
            body_text: Rgb::hex(0x111827),
            footer_rule: Rgb::hex(0xe5e7eb),
            footer_text: Rgb::hex(0x6b7280),
        }
    }

    pub const fn teal() -> Self {
        Theme {
            header_fill: Rgb::hex(0x00695c),
            table_header_fill: Rgb::hex(0xe0f2f1),
            table_header_text: Rgb::hex(0x004d40),
            header_rule: Rgb::hex(0x80cbc4),
            ..Theme::blue()
        }
    }

    pub const fn slate() -> Self {
        Theme {
            header_fill: Rgb::hex(0x334155),
            table_header_fill: Rgb::hex(0xe2e8f0),
            table_header_text: Rgb::hex(0x1e293b),
            header_rule: Rgb::hex(0x94a3b8),
            row_rule: Rgb::hex(0xf1f5f9),
            ..Theme::blue()
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub company_name: f32,
    pub company_details: f32,
    pub invoice_title: f32,
    pub invoice_meta: f32,
    pub bill_to: f32,
    pub table_header: f32,
    pub row: f32,
    pub totals: f32,
    pub grand_total: f32,
    pub footer: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            company_name: 22.0,
            company_details: 10.0,
            invoice_title: 12.0,
            invoice_meta: 10.0,
            bill_to: 12.0,
            table_header: 11.0,
            row: 10.0,
            totals: 11.0,
            grand_total: 12.0,
            footer: 9.0,
        }
    }
}

impl Typography {
    pub fn compact() -> Self {
        Typography {
            table_header: 10.0,
            row: 9.0,
            totals: 10.0,
            grand_total: 11.0,
            ..Typography::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_display() {
        assert_eq!(Rgb::hex(0x0d47a1), Rgb(0x0d, 0x47, 0xa1));
        assert_eq!(Rgb::hex(0x0d47a1).to_string(), "#0d47a1");
    }

    #[test]
    fn unit_components() {
        assert_eq!(Rgb(255, 0, 51).to_unit(), (1.0, 0.0, 0.2));
    }
}
