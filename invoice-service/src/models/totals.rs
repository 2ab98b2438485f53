use serde::Serialize;

/// Round half away from zero to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Money derived from validated items. Never taken from the client.
///
/// `subtotal` is the plain sum of item amounts and is not rounded; `tax` and
/// `total` are rounded to cents after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn compute<I>(amounts: I, tax_rate: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let subtotal: f64 = amounts.into_iter().sum();
        let tax = round2(subtotal * tax_rate);
        let total = round2(subtotal + tax);
        Self {
            subtotal,
            tax,
            total,
        }
    }

    /// False once the sum or the cent rounding has overflowed.
    pub fn is_finite(&self) -> bool {
        self.subtotal.is_finite() && self.tax.is_finite() && self.total.is_finite()
    }
}
