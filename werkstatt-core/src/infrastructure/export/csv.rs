//! CSV rendering for reports
//!
//! Pure renderers: the callers assemble the data through the handlers and
//! decide where the bytes go. Amounts are printed with two decimals.

use werkstatt_errors::{AppError, AppResult};

use crate::application::queries::ProfitLossReport;
use crate::domain::entities::Part;

/// Render a profit and loss report as a two-column CSV.
pub fn profit_loss_csv(report: &ProfitLossReport) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    write_row(&mut writer, &["Position", "Amount"])?;
    write_row(
        &mut writer,
        &["Period start", &report.from.format("%Y-%m-%d").to_string()],
    )?;
    write_row(
        &mut writer,
        &["Period end", &report.to.format("%Y-%m-%d").to_string()],
    )?;
    write_row(
        &mut writer,
        &["Invoiced total", &report.invoiced_total.rounded().to_string()],
    )?;
    write_row(
        &mut writer,
        &["Paid total", &report.paid_total.rounded().to_string()],
    )?;
    write_row(
        &mut writer,
        &[
            "Outstanding total",
            &report.outstanding_total.rounded().to_string(),
        ],
    )?;
    write_row(
        &mut writer,
        &["Invoice count", &report.invoice_count.to_string()],
    )?;
    write_row(
        &mut writer,
        &["Expense total", &report.expense_total.rounded().to_string()],
    )?;

    for entry in &report.expenses_by_category {
        let label = if entry.category.is_empty() {
            "Uncategorized"
        } else {
            &entry.category
        };
        write_row(
            &mut writer,
            &[
                &format!("Expenses ({})", label),
                &entry.total.rounded().to_string(),
            ],
        )?;
    }

    write_row(
        &mut writer,
        &["Net result", &report.net_result.rounded().to_string()],
    )?;

    finish(writer)
}

/// Render the parts inventory as CSV, one row per part. The stock value
/// column is the stock valued at purchase price.
pub fn inventory_csv(parts: &[Part]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    write_row(
        &mut writer,
        &[
            "SKU",
            "Description",
            "Category",
            "Stock",
            "Minimum",
            "Unit",
            "Purchase price",
            "Sale price",
            "Supplier",
            "Storage location",
            "Stock value",
        ],
    )?;

    for part in parts {
        let stock_value = (part.purchase_price() * part.stock_quantity()).rounded();
        write_row(
            &mut writer,
            &[
                part.sku().as_str(),
                part.description(),
                part.category(),
                &part.stock_quantity().to_string(),
                &part.min_stock().to_string(),
                part.unit(),
                &part.purchase_price().rounded().to_string(),
                &part.sale_price().rounded().to_string(),
                part.supplier(),
                part.storage_location(),
                &stock_value.to_string(),
            ],
        )?;
    }

    finish(writer)
}

fn write_row(writer: &mut csv::Writer<Vec<u8>>, row: &[&str]) -> AppResult<()> {
    writer
        .write_record(row)
        .map_err(|e| AppError::internal(format!("Failed to render CSV: {}", e)))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let buffer = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to render CSV: {}", e)))?;

    String::from_utf8(buffer).map_err(|e| AppError::internal(format!("Failed to render CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use werkstatt_domain_core::Money;

    use crate::application::queries::CategoryTotal;
    use crate::domain::value_objects::Sku;

    fn money(value: &str) -> Money {
        value.parse().unwrap()
    }

    #[test]
    fn test_profit_loss_rows() {
        let report = ProfitLossReport {
            from: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap(),
            invoiced_total: money("632.45"),
            paid_total: money("132.45"),
            outstanding_total: money("500.00"),
            invoice_count: 2,
            expense_total: money("3849.90"),
            expenses_by_category: vec![
                CategoryTotal {
                    category: "Rent".to_string(),
                    total: money("3600.00"),
                },
                CategoryTotal {
                    category: "Tools".to_string(),
                    total: money("249.90"),
                },
            ],
            net_result: money("-3217.45"),
        };

        let rendered = profit_loss_csv(&report).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Position,Amount");
        assert_eq!(lines[1], "Period start,2026-01-01");
        assert!(lines.contains(&"Invoiced total,632.45"));
        assert!(lines.contains(&"Expenses (Rent),3600.00"));
        assert!(lines.contains(&"Net result,-3217.45"));
    }

    #[test]
    fn test_inventory_values_stock_at_purchase_price() {
        let part = Part::new(
            Sku::new("BP-1001").unwrap(),
            "Brake pads front".to_string(),
            money("12.50"),
            money("24.90"),
        )
        .with_stock(4, 0);

        let rendered = inventory_csv(&[part]).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("SKU,Description"));
        assert!(lines[1].starts_with("BP-1001,Brake pads front"));
        assert!(lines[1].ends_with(",50.00"));
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let part = Part::new(
            Sku::new("OF-2").unwrap(),
            "Oil filter, long life".to_string(),
            money("4.00"),
            money("9.00"),
        );

        let rendered = inventory_csv(&[part]).unwrap();

        assert!(rendered.contains("\"Oil filter, long life\""));
    }
}
