use super::{fit_text, text_width, Canvas, TextStyle};
use crate::config::CompanyProfile;
use crate::format::format_currency;
use crate::layout::{paginate, Align, ColumnValue, LayoutConfig, PagePlan};
use crate::models::{InvoiceTotals, LineItem, NormalizedInvoice};

/// Everything that ends up on the page.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceDocument<'a> {
    pub layout: &'a LayoutConfig,
    pub company: &'a CompanyProfile,
    pub invoice: &'a NormalizedInvoice,
    pub totals: &'a InvoiceTotals,
    /// Already formatted for the invoice locale.
    pub date: &'a str,
}

impl InvoiceDocument<'_> {
    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.invoice.currency, &self.invoice.locale)
    }
}

/// Draw `text` inside a box of `width` starting at `x`, truncating it to fit.
fn boxed_text<C: Canvas>(
    canvas: &mut C,
    text: &str,
    x: f32,
    top: f32,
    width: f32,
    align: Align,
    style: TextStyle,
) {
    let fitted = fit_text(text, style.face, style.size, width);
    let x = match align {
        Align::Left => x,
        Align::Right => x + width - text_width(&fitted, style.face, style.size),
    };
    canvas.text(&fitted, x, top, style);
}

/// Lay the invoice out across as many pages as the rows need and return the
/// page count. Totals that would cross the footer rule move to a page of
/// their own.
pub fn draw_invoice<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>) -> usize {
    let geometry = &doc.layout.geometry;
    let plans = paginate(geometry, doc.invoice.items.len());

    draw_header(canvas, doc);
    draw_bill_to(canvas, doc);

    for (index, plan) in plans.iter().enumerate() {
        if index > 0 {
            canvas.new_page();
        }
        draw_table_header(canvas, doc, plan.table_top);
        draw_rows(canvas, doc, plan);
    }

    let mut pages = plans.len();
    // `paginate` always yields at least one page.
    if let Some(last) = plans.last() {
        let mut cursor = last.cursor_after_rows(geometry) + geometry.totals_gap;
        if !geometry.fits_totals(cursor, doc.layout.typography.grand_total) {
            canvas.new_page();
            pages += 1;
            cursor = geometry.margin;
        }
        draw_totals(canvas, doc, cursor);
    }
    draw_footer(canvas, doc);

    pages
}

fn draw_header<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>) {
    let geometry = &doc.layout.geometry;
    let theme = &doc.layout.theme;
    let type_sizes = &doc.layout.typography;

    canvas.fill_rect(
        0.0,
        0.0,
        geometry.page_width,
        geometry.header_band_height,
        theme.header_fill,
    );

    let left_width = geometry.table_width() - geometry.meta_block_width;
    boxed_text(
        canvas,
        &doc.company.name,
        geometry.margin,
        geometry.company_top,
        left_width,
        Align::Left,
        TextStyle::bold(type_sizes.company_name, theme.header_text),
    );
    let details = [&doc.company.address_line1, &doc.company.address_line2];
    for (n, line) in details.iter().enumerate() {
        boxed_text(
            canvas,
            line,
            geometry.margin,
            geometry.company_details_top + n as f32 * geometry.header_line_height,
            left_width,
            Align::Left,
            TextStyle::regular(type_sizes.company_details, theme.header_text),
        );
    }

    let meta_x = geometry.table_right() - geometry.meta_block_width;
    boxed_text(
        canvas,
        "INVOICE",
        meta_x,
        geometry.company_top,
        geometry.meta_block_width,
        Align::Right,
        TextStyle::bold(type_sizes.invoice_title, theme.header_text),
    );
    let number = if doc.invoice.invoice_number.is_empty() {
        "N/A"
    } else {
        doc.invoice.invoice_number.as_str()
    };
    let meta = [format!("Invoice #: {}", number), format!("Date: {}", doc.date)];
    for (n, line) in meta.iter().enumerate() {
        boxed_text(
            canvas,
            line,
            meta_x,
            geometry.meta_details_top + n as f32 * geometry.header_line_height,
            geometry.meta_block_width,
            Align::Right,
            TextStyle::regular(type_sizes.invoice_meta, theme.header_text),
        );
    }
}

fn draw_bill_to<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>) {
    let geometry = &doc.layout.geometry;
    let color = doc.layout.theme.body_text;
    let size = doc.layout.typography.bill_to;

    canvas.text(
        "Bill To:",
        geometry.margin,
        geometry.bill_to_top,
        TextStyle::bold(size, color),
    );
    boxed_text(
        canvas,
        &doc.invoice.customer_name,
        geometry.margin + geometry.bill_to_label_width,
        geometry.bill_to_top,
        geometry.table_width() - geometry.bill_to_label_width,
        Align::Left,
        TextStyle::regular(size, color),
    );
}

fn draw_table_header<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>, top: f32) {
    let layout = doc.layout;
    let geometry = &layout.geometry;
    let style = TextStyle::bold(layout.typography.table_header, layout.theme.table_header_text);

    canvas.fill_rect(
        geometry.table_left(),
        top,
        geometry.table_width(),
        geometry.table_header_height,
        layout.theme.table_header_fill,
    );

    let cells = layout
        .columns
        .iter()
        .zip(layout.column_offsets())
        .zip(layout.column_widths());
    for ((column, x), width) in cells {
        boxed_text(
            canvas,
            &column.title,
            x + geometry.cell_padding,
            top + geometry.header_text_inset,
            width - 2.0 * geometry.cell_padding,
            column.align,
            style,
        );
    }

    canvas.rule(
        geometry.table_left(),
        geometry.table_right(),
        top + geometry.table_header_height,
        layout.theme.header_rule,
    );
}

fn cell_text(doc: &InvoiceDocument<'_>, value: ColumnValue, item: &LineItem) -> String {
    match value {
        ColumnValue::UnitPrice => doc.money(item.unit_price()),
        ColumnValue::Amount => doc.money(item.amount()),
        other => doc.layout.cell_text(other, item).unwrap_or_default(),
    }
}

fn draw_rows<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>, plan: &PagePlan) {
    let layout = doc.layout;
    let geometry = &layout.geometry;
    let style = TextStyle::regular(layout.typography.row, layout.theme.body_text);
    let offsets = layout.column_offsets();
    let widths = layout.column_widths();

    for (n, item) in doc.invoice.items[plan.rows.clone()].iter().enumerate() {
        let row_top = plan.row_top(geometry, n);
        for ((column, x), width) in layout.columns.iter().zip(&offsets).zip(&widths) {
            boxed_text(
                canvas,
                &cell_text(doc, column.value, item),
                x + geometry.cell_padding,
                row_top + geometry.row_text_inset,
                width - 2.0 * geometry.cell_padding,
                column.align,
                style,
            );
        }
        canvas.rule(
            geometry.table_left(),
            geometry.table_right(),
            row_top + geometry.row_height,
            layout.theme.row_rule,
        );
    }
}

/// Totals sit right-aligned under the last column.
fn draw_totals<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>, top: f32) {
    let layout = doc.layout;
    let geometry = &layout.geometry;
    let color = layout.theme.body_text;

    let value_x = layout.column_offsets().last().copied().unwrap_or(geometry.table_left())
        + geometry.cell_padding;
    let value_width = layout.column_widths().last().copied().unwrap_or(geometry.table_width())
        - 2.0 * geometry.cell_padding;
    let label_x = value_x - geometry.totals_label_offset;

    let lines = [
        ("Subtotal".to_string(), doc.totals.subtotal, TextStyle::regular(layout.typography.totals, color)),
        (layout.tax_label(), doc.totals.tax, TextStyle::regular(layout.typography.totals, color)),
        ("Total".to_string(), doc.totals.total, TextStyle::bold(layout.typography.grand_total, color)),
    ];
    for (n, (label, amount, style)) in lines.iter().enumerate() {
        let line_top = top + n as f32 * geometry.totals_line_height;
        boxed_text(
            canvas,
            label,
            label_x,
            line_top,
            geometry.totals_label_width,
            Align::Right,
            *style,
        );
        boxed_text(
            canvas,
            &doc.money(*amount),
            value_x,
            line_top,
            value_width,
            Align::Right,
            *style,
        );
    }
}

fn draw_footer<C: Canvas>(canvas: &mut C, doc: &InvoiceDocument<'_>) {
    let geometry = &doc.layout.geometry;
    let theme = &doc.layout.theme;
    let style = TextStyle::regular(doc.layout.typography.footer, theme.footer_text);
    let top = geometry.footer_top();

    canvas.rule(geometry.table_left(), geometry.table_right(), top, theme.footer_rule);

    let text_top = top + geometry.footer_text_inset;
    boxed_text(
        canvas,
        &doc.company.payment_terms,
        geometry.table_left(),
        text_top,
        geometry.table_width(),
        Align::Left,
        style,
    );
    let contact = format!("{}  |  {}", doc.company.website, doc.company.email);
    boxed_text(
        canvas,
        &contact,
        geometry.table_left(),
        text_top + geometry.footer_line_height,
        geometry.table_width(),
        Align::Right,
        style,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{page_capacity, Rgb};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect { page: usize, top: f32, color: Rgb },
        Rule { page: usize, y: f32 },
        Text { page: usize, text: String, x: f32, top: f32, style: TextStyle },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        page: usize,
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn texts_on(&self, page: usize) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { page: p, text, .. } if *p == page => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn find_text(&self, wanted: &str) -> Option<(usize, f32, f32, TextStyle)> {
            self.ops.iter().find_map(|op| match op {
                Op::Text { page, text, x, top, style } if text == wanted => {
                    Some((*page, *x, *top, *style))
                }
                _ => None,
            })
        }
    }

    impl Canvas for RecordingCanvas {
        fn new_page(&mut self) {
            self.page += 1;
        }

        fn fill_rect(&mut self, _x: f32, top: f32, _width: f32, _height: f32, color: Rgb) {
            self.ops.push(Op::Rect { page: self.page, top, color });
        }

        fn rule(&mut self, _x1: f32, _x2: f32, y: f32, _color: Rgb) {
            self.ops.push(Op::Rule { page: self.page, y });
        }

        fn text(&mut self, text: &str, x: f32, top: f32, style: TextStyle) {
            self.ops.push(Op::Text {
                page: self.page,
                text: text.to_string(),
                x,
                top,
                style,
            });
        }
    }

    fn invoice_with(count: usize) -> NormalizedInvoice {
        NormalizedInvoice {
            customer_name: "Acme Corp".to_string(),
            items: (0..count)
                .map(|n| LineItem::Priced {
                    description: format!("Item {}", n + 1),
                    amount: 10.0,
                })
                .collect(),
            invoice_number: "INV-1001".to_string(),
            date: None,
            currency: "USD".to_string(),
            locale: "en-US".to_string(),
        }
    }

    fn draw(layout: &LayoutConfig, invoice: &NormalizedInvoice) -> (RecordingCanvas, usize) {
        let company = CompanyProfile::default();
        let totals = InvoiceTotals::compute(invoice.items.iter().map(LineItem::amount), layout.tax_rate);
        let doc = InvoiceDocument {
            layout,
            company: &company,
            invoice,
            totals: &totals,
            date: "1/15/2024",
        };
        let mut canvas = RecordingCanvas::default();
        let pages = draw_invoice(&mut canvas, &doc);
        (canvas, pages)
    }

    #[test]
    fn single_page_invoice_has_every_section() {
        let layout = LayoutConfig::standard();
        let (canvas, pages) = draw(&layout, &invoice_with(2));

        assert_eq!(pages, 1);
        let texts = canvas.texts_on(0);
        for expected in [
            "Auto Invoice Generator Co.",
            "INVOICE",
            "Invoice #: INV-1001",
            "Date: 1/15/2024",
            "Bill To:",
            "Acme Corp",
            "Description",
            "Amount",
            "Item 1",
            "Subtotal",
            "Tax (18%)",
            "Total",
            "$23.60",
            "Payment is due upon receipt.",
            "www.example.com  |  support@example.com",
        ] {
            assert!(texts.contains(&expected), "missing {:?}", expected);
        }
        assert_eq!(
            canvas.ops.first(),
            Some(&Op::Rect { page: 0, top: 0.0, color: layout.theme.header_fill })
        );
    }

    #[test]
    fn missing_invoice_number_shows_placeholder() {
        let mut invoice = invoice_with(1);
        invoice.invoice_number.clear();
        let (canvas, _) = draw(&LayoutConfig::standard(), &invoice);
        assert!(canvas.texts_on(0).contains(&"Invoice #: N/A"));
    }

    #[test]
    fn overflow_row_moves_to_new_page_with_table_header() {
        let layout = LayoutConfig::standard();
        let (first, _) = page_capacity(&layout.geometry);
        let (canvas, pages) = draw(&layout, &invoice_with(first + 1));

        assert_eq!(pages, 2);
        let second = canvas.texts_on(1);
        assert!(second.contains(&"Description"));
        assert!(second.contains(&"Amount"));
        assert!(second.contains(&"Total"));
        assert!(second.contains(&"Payment is due upon receipt."));
        assert!(!second.contains(&"Bill To:"));
        assert!(!canvas.texts_on(0).contains(&"Subtotal"));

        let (page, _, top, _) = canvas
            .find_text(&format!("Item {}", first + 1))
            .expect("overflow row drawn");
        assert_eq!(page, 1);
        let geometry = &layout.geometry;
        assert_eq!(
            top,
            geometry.margin + geometry.table_header_height + geometry.row_text_inset
        );
    }

    fn rule_ys_on(canvas: &RecordingCanvas, page: usize) -> Vec<f32> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Rule { page: p, y } if *p == page => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn full_first_page_keeps_totals_above_footer() {
        for layout in [LayoutConfig::standard(), LayoutConfig::itemized(), LayoutConfig::compact()] {
            let geometry = layout.geometry;
            let (first, _) = page_capacity(&geometry);
            let (canvas, pages) = draw(&layout, &invoice_with(first));

            assert_eq!(pages, 1, "{}", layout.name);
            let (page, _, top, style) = canvas.find_text("Total").expect("total drawn");
            assert_eq!(page, 0);
            assert!(top + style.size <= geometry.footer_top(), "{}", layout.name);
            assert!(rule_ys_on(&canvas, 0).contains(&geometry.footer_top()));
        }
    }

    #[test]
    fn totals_without_room_move_to_their_own_page() {
        let mut layout = LayoutConfig::standard();
        layout.geometry.footer_offset = layout.geometry.bottom_reserve;
        let (first, _) = page_capacity(&layout.geometry);
        let (canvas, pages) = draw(&layout, &invoice_with(first));

        assert_eq!(pages, 2);
        assert!(!canvas.texts_on(0).contains(&"Subtotal"));
        let (page, _, top, _) = canvas.find_text("Subtotal").expect("subtotal drawn");
        assert_eq!(page, 1);
        assert_eq!(top, layout.geometry.margin);
        assert!(canvas.texts_on(1).contains(&"Payment is due upon receipt."));
    }

    #[test]
    fn amounts_are_right_aligned_to_column_padding() {
        let layout = LayoutConfig::standard();
        let (canvas, _) = draw(&layout, &invoice_with(1));

        let (_, x, _, style) = canvas.find_text("$10.00").expect("amount drawn");
        let right = x + text_width("$10.00", style.face, style.size);
        let expected = layout.geometry.table_right() - layout.geometry.cell_padding;
        assert!((right - expected).abs() < 1e-3);
    }

    #[test]
    fn totals_follow_last_row() {
        let layout = LayoutConfig::standard();
        let geometry = layout.geometry;
        let (canvas, _) = draw(&layout, &invoice_with(3));

        let (_, _, top, _) = canvas.find_text("Subtotal").expect("subtotal drawn");
        let last_row_bottom = geometry.table_top + geometry.table_header_height + 3.0 * geometry.row_height;
        assert_eq!(top, last_row_bottom + geometry.totals_gap);

        let (_, _, total_top, style) = canvas.find_text("Total").expect("total drawn");
        assert_eq!(total_top, top + 2.0 * geometry.totals_line_height);
        assert_eq!(style.face, crate::render::FontFace::Bold);
    }

    #[test]
    fn itemized_layout_prints_quantity_and_unit_price() {
        let layout = LayoutConfig::itemized();
        let mut invoice = invoice_with(0);
        invoice.items.push(LineItem::Quantity {
            name: "Bolt".to_string(),
            description: None,
            quantity: 4,
            price: 2.5,
        });
        let (canvas, _) = draw(&layout, &invoice);

        let texts = canvas.texts_on(0);
        for expected in ["Item", "Qty", "Unit Price", "Bolt", "4", "$2.50", "$10.00"] {
            assert!(texts.contains(&expected), "missing {:?}", expected);
        }
    }

    #[test]
    fn long_descriptions_are_truncated_inside_the_column() {
        let layout = LayoutConfig::standard();
        let mut invoice = invoice_with(0);
        invoice.items.push(LineItem::Priced {
            description: "Consulting ".repeat(40),
            amount: 1.0,
        });
        let (canvas, _) = draw(&layout, &invoice);

        let truncated = canvas
            .texts_on(0)
            .into_iter()
            .find(|t| t.starts_with("Consulting"))
            .expect("description drawn");
        assert!(truncated.ends_with("..."));
        let limit = layout.column_widths()[0] - 2.0 * layout.geometry.cell_padding;
        assert!(text_width(truncated, crate::render::FontFace::Regular, 10.0) <= limit);
    }
}
