//! CSV export of the billing report

use crate::error::{AppError, AppResult};
use crate::services::billing::BillingReport;
use shared::grid::{billing_grid, format_cell_id, EXPORT_HEADERS};

/// Render the report as a CSV document via the export grid.
///
/// Going through the grid rather than straight from the report keeps the
/// spreadsheet view and the downloaded file guaranteed to agree cell for
/// cell.
pub fn report_to_csv(report: &BillingReport) -> AppResult<String> {
    let grid = billing_grid(&report.product_totals, &report.overall);

    // header + one row per product + totals row
    let rows = report.product_totals.len() as u32 + 2;
    let cols = EXPORT_HEADERS.len() as u32;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in 1..=rows {
        let record: Vec<String> = (1..=cols)
            .map(|col| grid.value(&format_cell_id(col, row)))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{FinancialSummary, OverallTotals, ProductTotal};
    use uuid::Uuid;

    fn report_with_one_product() -> BillingReport {
        let mut total = ProductTotal::zero(Uuid::new_v4(), "Chicken".to_string());
        total.quantity = 7;
        total.amount = Decimal::from(70);
        total.reclassified_to_paid = Decimal::from(50);

        let overall = OverallTotals {
            quantity: 7,
            sales: Decimal::from(70),
            reclassified_to_paid: Decimal::from(50),
            paid_with_qr: Decimal::ZERO,
            unpaid_to_paid_qr: Decimal::ZERO,
        };

        BillingReport {
            product_totals: vec![total],
            overall,
            financial: FinancialSummary {
                cash_in_counter: Decimal::from(70),
                cash_in_bank: Decimal::ZERO,
                net_profit: Decimal::from(70),
            },
            total_expenses: Decimal::ZERO,
        }
    }

    #[test]
    fn test_csv_has_header_product_and_totals_rows() {
        let csv = report_to_csv(&report_with_one_product()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Product,Quantity,Sales"));
        assert!(lines[1].starts_with("Chicken,7,70"));
        assert!(lines[2].starts_with("Total,7,70"));
    }

    #[test]
    fn test_csv_for_empty_catalog() {
        let report = BillingReport {
            product_totals: vec![],
            overall: OverallTotals::default(),
            financial: FinancialSummary {
                cash_in_counter: Decimal::ZERO,
                cash_in_bank: Decimal::ZERO,
                net_profit: Decimal::ZERO,
            },
            total_expenses: Decimal::ZERO,
        };
        let csv = report_to_csv(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Total,0,0"));
    }
}
