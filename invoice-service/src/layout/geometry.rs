/// Fixed page coordinates in points, measured from the top-left corner.
///
/// Every drawing position is derived from these values so pagination can be
/// tuned and tested without touching the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub header_band_height: f32,
    /// Baseline-independent top of the first company line inside the band.
    pub company_top: f32,
    /// Top of the first address line under the company name.
    pub company_details_top: f32,
    pub header_line_height: f32,
    /// Top of the first meta line under the `INVOICE` title.
    pub meta_details_top: f32,
    pub bill_to_top: f32,
    pub bill_to_label_width: f32,
    pub meta_block_width: f32,
    pub table_top: f32,
    pub table_header_height: f32,
    pub row_height: f32,
    pub cell_padding: f32,
    /// Offset of header text from the top of the table header.
    pub header_text_inset: f32,
    /// Offset of row text from the top of the row.
    pub row_text_inset: f32,
    /// Space kept free at the bottom of every page for totals and footer.
    pub bottom_reserve: f32,
    pub totals_gap: f32,
    pub totals_line_height: f32,
    pub totals_label_width: f32,
    pub totals_label_offset: f32,
    /// Distance of the footer rule from the bottom edge.
    pub footer_offset: f32,
    pub footer_text_inset: f32,
    pub footer_line_height: f32,
}

impl PageGeometry {
    /// A4 portrait.
    pub const fn a4() -> Self {
        PageGeometry {
            page_width: 595.28,
            page_height: 841.89,
            margin: 50.0,
            header_band_height: 90.0,
            company_top: 25.0,
            company_details_top: 55.0,
            header_line_height: 15.0,
            meta_details_top: 45.0,
            bill_to_top: 110.0,
            bill_to_label_width: 70.0,
            meta_block_width: 200.0,
            table_top: 140.0,
            table_header_height: 26.0,
            row_height: 24.0,
            cell_padding: 8.0,
            header_text_inset: 8.0,
            row_text_inset: 6.0,
            bottom_reserve: 140.0,
            totals_gap: 16.0,
            totals_line_height: 18.0,
            totals_label_width: 120.0,
            totals_label_offset: 140.0,
            footer_offset: 70.0,
            footer_text_inset: 10.0,
            footer_line_height: 14.0,
        }
    }

    /// A4 with tighter rows.
    pub const fn a4_compact() -> Self {
        PageGeometry {
            row_height: 18.0,
            row_text_inset: 4.0,
            ..PageGeometry::a4()
        }
    }

    pub fn table_left(&self) -> f32 {
        self.margin
    }

    pub fn table_right(&self) -> f32 {
        self.page_width - self.margin
    }

    pub fn table_width(&self) -> f32 {
        self.table_right() - self.table_left()
    }

    /// No row may extend below this line.
    pub fn row_limit(&self) -> f32 {
        self.page_height - self.bottom_reserve
    }

    /// Whether a row starting at `cursor` ends above the reserved margin.
    pub fn fits_row(&self, cursor: f32) -> bool {
        cursor + self.row_height <= self.row_limit()
    }

    /// Top of the table header on continuation pages.
    pub fn continuation_table_top(&self) -> f32 {
        self.margin
    }

    pub fn footer_top(&self) -> f32 {
        self.page_height - self.footer_offset
    }

    /// Whether the three totals lines starting at `top` end above the footer rule.
    pub fn fits_totals(&self, top: f32, grand_total_size: f32) -> bool {
        top + 2.0 * self.totals_line_height + grand_total_size <= self.footer_top()
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}
