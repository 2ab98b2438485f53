use super::PageGeometry;
use std::ops::Range;

/// Rows placed on one page, and where that page's table header sits.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub table_top: f32,
    pub rows: Range<usize>,
}

impl PagePlan {
    /// Top of the first row under the table header.
    pub fn first_row_top(&self, geometry: &PageGeometry) -> f32 {
        self.table_top + geometry.table_header_height
    }

    /// Top of the `n`th row on this page (0-based, relative to the page).
    pub fn row_top(&self, geometry: &PageGeometry, n: usize) -> f32 {
        self.first_row_top(geometry) + n as f32 * geometry.row_height
    }

    /// Cursor just below the last row on this page.
    pub fn cursor_after_rows(&self, geometry: &PageGeometry) -> f32 {
        self.row_top(geometry, self.rows.len())
    }
}

/// Split `item_count` rows across pages.
///
/// Before each row: if it would cross into the bottom reserve, close the page
/// and continue on a new one whose table header sits at the top margin. The
/// row after a break is always placed, so a geometry with no room for rows
/// still terminates with one row per page.
pub fn paginate(geometry: &PageGeometry, item_count: usize) -> Vec<PagePlan> {
    let mut pages = Vec::new();
    let mut table_top = geometry.table_top;
    let mut page_start = 0;
    let mut cursor = table_top + geometry.table_header_height;

    for index in 0..item_count {
        if !geometry.fits_row(cursor) {
            pages.push(PagePlan {
                table_top,
                rows: page_start..index,
            });
            table_top = geometry.continuation_table_top();
            page_start = index;
            cursor = table_top + geometry.table_header_height;
        }
        cursor += geometry.row_height;
    }

    pages.push(PagePlan {
        table_top,
        rows: page_start..item_count,
    });
    pages
}

/// How many rows fit on the first page and on each continuation page.
pub fn page_capacity(geometry: &PageGeometry) -> (usize, usize) {
    let count_from = |top: f32| {
        let mut cursor = top + geometry.table_header_height;
        let mut rows = 0;
        while geometry.fits_row(cursor) {
            cursor += geometry.row_height;
            rows += 1;
        }
        rows
    };
    (
        count_from(geometry.table_top),
        count_from(geometry.continuation_table_top()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_capacity_matches_reserved_margin() {
        assert_eq!(page_capacity(&PageGeometry::a4()), (22, 26));
    }

    #[test]
    fn single_page_when_rows_fit() {
        let geometry = PageGeometry::a4();
        let pages = paginate(&geometry, 3);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rows, 0..3);
        assert_eq!(pages[0].table_top, geometry.table_top);
        assert_eq!(pages[0].row_top(&geometry, 0), 166.0);
        assert_eq!(pages[0].cursor_after_rows(&geometry), 166.0 + 3.0 * 24.0);
    }

    #[test]
    fn one_row_past_capacity_opens_second_page() {
        let geometry = PageGeometry::a4();
        let (first, _) = page_capacity(&geometry);

        let pages = paginate(&geometry, first);
        assert_eq!(pages.len(), 1);

        let pages = paginate(&geometry, first + 1);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows, 0..first);
        assert_eq!(pages[1].rows, first..first + 1);
        assert_eq!(pages[1].table_top, geometry.margin);
    }

    #[test]
    fn continuation_pages_use_their_own_capacity() {
        let geometry = PageGeometry::a4();
        let (first, rest) = page_capacity(&geometry);

        let pages = paginate(&geometry, first + rest + 1);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].rows.len(), rest);
        assert_eq!(pages[2].rows.len(), 1);
    }

    #[test]
    fn every_row_is_placed_exactly_once() {
        let geometry = PageGeometry::a4_compact();
        for count in [0, 1, 30, 31, 77, 200] {
            let pages = paginate(&geometry, count);
            let placed: Vec<usize> = pages.iter().flat_map(|p| p.rows.clone()).collect();
            assert_eq!(placed, (0..count).collect::<Vec<_>>());
            for page in &pages {
                if !page.rows.is_empty() {
                    assert!(geometry.fits_row(page.row_top(&geometry, page.rows.len() - 1)));
                }
            }
        }
    }

    #[test]
    fn empty_invoice_still_has_one_page() {
        let pages = paginate(&PageGeometry::a4(), 0);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].rows.is_empty());
    }
}
