//! Billing report to grid conversion
//!
//! Produces the fixed spreadsheet layout the export feature downloads: a
//! header row, one row per product, and a totals row. Totals cells carry the
//! computed sum as their value and a textual `SUM(range)` formula for the
//! downstream spreadsheet-file writer; those range formulas are a convention
//! of that writer, not something the cell evaluator resolves.

use crate::grid::cell::{CellPatch, Grid, GridCell, StylePatch};
use crate::models::{OverallTotals, ProductTotal};

/// Column headers, in sheet order (columns A through F)
pub const EXPORT_HEADERS: [&str; 6] = [
    "Product",
    "Quantity",
    "Sales",
    "Paid with QR",
    "Unpaid to Paid",
    "Unpaid to Paid QR",
];

/// Build the export grid for a billing report.
pub fn billing_grid(product_totals: &[ProductTotal], overall: &OverallTotals) -> Grid {
    let mut grid = Grid::new();

    for (i, header) in EXPORT_HEADERS.iter().enumerate() {
        let id = crate::grid::format_cell_id(i as u32 + 1, 1);
        grid.set(
            &id,
            CellPatch {
                value: Some(header.to_string()),
                style: Some(StylePatch {
                    bold: Some(true),
                    ..Default::default()
                }),
            },
        );
    }

    for (i, total) in product_totals.iter().enumerate() {
        let row = i as u32 + 2;
        let values = [
            total.name.clone(),
            total.quantity.to_string(),
            total.amount.to_string(),
            total.paid_with_qr.to_string(),
            total.reclassified_to_paid.to_string(),
            total.unpaid_to_paid_qr.to_string(),
        ];
        for (col, value) in values.into_iter().enumerate() {
            let id = crate::grid::format_cell_id(col as u32 + 1, row);
            grid.set(
                &id,
                CellPatch {
                    value: Some(value),
                    style: None,
                },
            );
        }
    }

    let totals_row = product_totals.len() as u32 + 2;
    let last_data_row = totals_row - 1;
    grid.set(
        &crate::grid::format_cell_id(1, totals_row),
        CellPatch {
            value: Some("Total".to_string()),
            style: Some(StylePatch {
                bold: Some(true),
                ..Default::default()
            }),
        },
    );

    let totals = [
        overall.quantity.to_string(),
        overall.sales.to_string(),
        overall.paid_with_qr.to_string(),
        overall.reclassified_to_paid.to_string(),
        overall.unpaid_to_paid_qr.to_string(),
    ];
    for (i, value) in totals.into_iter().enumerate() {
        let col = i as u32 + 2;
        let totals_id = crate::grid::format_cell_id(col, totals_row);
        // "SUM(B2:B6)" style range over the data rows of this column. With
        // no products there are no data rows and the range would point at
        // the totals cell itself, so no formula is attached.
        let range_formula = (last_data_row >= 2).then(|| {
            let range_start = crate::grid::format_cell_id(col, 2);
            let range_end = crate::grid::format_cell_id(col, last_data_row);
            format!("SUM({range_start}:{range_end})")
        });
        grid.store(
            &totals_id,
            GridCell {
                value,
                style: crate::grid::CellStyle {
                    bold: true,
                    ..Default::default()
                },
                formula: range_formula,
            },
        );
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn totals() -> (Vec<ProductTotal>, OverallTotals) {
        let rows = vec![
            ProductTotal {
                id: Uuid::new_v4(),
                name: "Chicken".to_string(),
                quantity: 7,
                amount: Decimal::from(70),
                reclassified_to_paid: Decimal::from(50),
                paid_with_qr: Decimal::from(30),
                unpaid_to_paid_qr: Decimal::from(20),
            },
            ProductTotal {
                id: Uuid::new_v4(),
                name: "Rice".to_string(),
                quantity: 2,
                amount: Decimal::from(160),
                reclassified_to_paid: Decimal::ZERO,
                paid_with_qr: Decimal::ZERO,
                unpaid_to_paid_qr: Decimal::ZERO,
            },
        ];
        let overall = crate::billing::aggregate_overall_totals(&rows);
        (rows, overall)
    }

    #[test]
    fn test_header_row() {
        let (rows, overall) = totals();
        let grid = billing_grid(&rows, &overall);
        assert_eq!(grid.value("A1"), "Product");
        assert_eq!(grid.value("F1"), "Unpaid to Paid QR");
        assert!(grid.get("A1").style.bold);
    }

    #[test]
    fn test_product_rows_follow_input_order() {
        let (rows, overall) = totals();
        let grid = billing_grid(&rows, &overall);
        assert_eq!(grid.value("A2"), "Chicken");
        assert_eq!(grid.value("B2"), "7");
        assert_eq!(grid.value("C2"), "70");
        assert_eq!(grid.value("A3"), "Rice");
        assert_eq!(grid.value("C3"), "160");
    }

    #[test]
    fn test_totals_row_carries_sum_formulas() {
        let (rows, overall) = totals();
        let grid = billing_grid(&rows, &overall);
        assert_eq!(grid.value("A4"), "Total");
        assert_eq!(grid.value("B4"), "9");
        assert_eq!(grid.value("C4"), "230");
        assert_eq!(grid.get("B4").formula.as_deref(), Some("SUM(B2:B3)"));
        assert_eq!(grid.get("F4").formula.as_deref(), Some("SUM(F2:F3)"));
    }

    #[test]
    fn test_empty_report_still_has_header_and_totals() {
        let grid = billing_grid(&[], &OverallTotals::default());
        assert_eq!(grid.value("A1"), "Product");
        assert_eq!(grid.value("A2"), "Total");
        assert_eq!(grid.value("B2"), "0");
    }

    #[test]
    fn test_empty_report_totals_carry_no_range_formula() {
        // Without data rows a SUM range would be inverted and point back at
        // the totals cell itself
        let grid = billing_grid(&[], &OverallTotals::default());
        for id in ["B2", "C2", "D2", "E2", "F2"] {
            assert!(grid.get(id).formula.is_none(), "{id} should have no formula");
        }
    }
}
