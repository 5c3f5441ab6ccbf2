use std::sync::{Arc, Once};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use werkstatt_common::Pagination;
use werkstatt_core::application::commands::{
    AddOrderLineCommand, CreateCustomerCommand, CreateExpenseCommand, CreateInvoiceCommand,
    CreateOrderCommand, CreatePartCommand, DeleteExpenseCommand, MarkInvoicePaidCommand,
    SetSettingCommand, UpdateExpenseCommand,
};
use werkstatt_core::application::handlers::{
    CustomerHandler, ExpenseHandler, InvoiceHandler, OrderHandler, PartHandler, ReportHandler,
    SettingsHandler,
};
use werkstatt_core::application::queries::{GetExpenseQuery, ListExpensesQuery, ProfitLossQuery};
use werkstatt_core::domain::entities::{setting_keys, ExpenseFilter};
use werkstatt_core::domain::enums::{OrderPriority, PaymentMethod};
use werkstatt_core::domain::repositories::{
    CustomerRepository, ExpenseRepository, InvoiceRepository, OrderRepository, PartRepository,
    SettingRepository, VehicleRepository,
};
use werkstatt_core::domain::value_objects::{ExpenseId, InvoiceId};
use werkstatt_core::infrastructure::export::profit_loss_csv;
use werkstatt_core::infrastructure::persistence::{
    database, SqliteCustomerRepository, SqliteExpenseRepository, SqliteInvoiceRepository,
    SqliteOrderRepository, SqlitePartRepository, SqliteSettingRepository,
    SqliteVehicleRepository,
};
use werkstatt_errors::AppError;

struct App {
    customers: CustomerHandler,
    parts: PartHandler,
    orders: OrderHandler,
    invoices: InvoiceHandler,
    expenses: ExpenseHandler,
    settings: SettingsHandler,
    reports: ReportHandler,
}

static TRACING: Once = Once::new();

async fn setup() -> App {
    TRACING.call_once(|| werkstatt_telemetry::init_tracing("warn"));

    let pool = database::in_memory()
        .await
        .expect("Failed to open in-memory database");

    let customer_repo: Arc<dyn CustomerRepository> =
        Arc::new(SqliteCustomerRepository::new(pool.clone()));
    let vehicle_repo: Arc<dyn VehicleRepository> =
        Arc::new(SqliteVehicleRepository::new(pool.clone()));
    let part_repo: Arc<dyn PartRepository> = Arc::new(SqlitePartRepository::new(pool.clone()));
    let order_repo: Arc<dyn OrderRepository> = Arc::new(SqliteOrderRepository::new(pool.clone()));
    let invoice_repo: Arc<dyn InvoiceRepository> =
        Arc::new(SqliteInvoiceRepository::new(pool.clone()));
    let expense_repo: Arc<dyn ExpenseRepository> =
        Arc::new(SqliteExpenseRepository::new(pool.clone()));
    let setting_repo: Arc<dyn SettingRepository> =
        Arc::new(SqliteSettingRepository::new(pool.clone()));

    App {
        customers: CustomerHandler::new(customer_repo.clone(), order_repo.clone()),
        parts: PartHandler::new(part_repo.clone(), order_repo.clone()),
        orders: OrderHandler::new(
            order_repo.clone(),
            customer_repo.clone(),
            vehicle_repo,
            part_repo.clone(),
            invoice_repo.clone(),
            setting_repo.clone(),
        ),
        invoices: InvoiceHandler::new(
            invoice_repo.clone(),
            order_repo,
            customer_repo,
            part_repo.clone(),
            setting_repo.clone(),
        ),
        expenses: ExpenseHandler::new(expense_repo.clone()),
        settings: SettingsHandler::new(setting_repo),
        reports: ReportHandler::new(invoice_repo, expense_repo, part_repo),
    }
}

async fn create_expense(app: &App, category: &str, amount: &str, days_ago: i64) -> ExpenseId {
    app.expenses
        .create(CreateExpenseCommand {
            category: category.to_string(),
            amount: amount.parse().expect("Bad amount"),
            date: Utc::now() - Duration::days(days_ago),
            description: String::new(),
            receipt_number: String::new(),
        })
        .await
        .expect("Failed to create expense")
}

/// Creates and invoices an order: 1.5 h labor and two parts at 16.49
/// when `with_labor` is set (132.45), otherwise one line at a fixed
/// 100.00 (107.70).
async fn create_invoice(app: &App, sku: &str, with_labor: bool) -> InvoiceId {
    let customer_id = app
        .customers
        .create(CreateCustomerCommand {
            first_name: "Anna".to_string(),
            last_name: "Keller".to_string(),
            company: None,
            phone: String::new(),
            email: String::new(),
            street: String::new(),
            postal_code: String::new(),
            city: String::new(),
            notes: String::new(),
        })
        .await
        .expect("Failed to create customer");

    let part_id = app
        .parts
        .create(CreatePartCommand {
            sku: sku.to_string(),
            description: "Oil filter".to_string(),
            category: String::new(),
            stock_quantity: 10,
            min_stock: 0,
            purchase_price: "9.80".parse().expect("Bad price"),
            sale_price: "16.49".parse().expect("Bad price"),
            supplier: String::new(),
            storage_location: String::new(),
            unit: "piece".to_string(),
        })
        .await
        .expect("Failed to create part");

    let labor_hours = if with_labor { "1.5" } else { "0" };
    let order_id = app
        .orders
        .create(CreateOrderCommand {
            customer_id,
            vehicle_id: None,
            title: "Service".to_string(),
            description: String::new(),
            priority: OrderPriority::Normal,
            labor_hours: labor_hours.parse().expect("Bad hours"),
        })
        .await
        .expect("Failed to create order");

    let (quantity, unit_price) = if with_labor {
        (2, None)
    } else {
        (1, Some("100.00".parse().expect("Bad price")))
    };
    app.orders
        .add_line(AddOrderLineCommand {
            order_id: order_id.clone(),
            part_id,
            quantity,
            discount_percent: Decimal::ZERO,
            unit_price,
        })
        .await
        .expect("Failed to add line");

    app.invoices
        .create(CreateInvoiceCommand {
            order_id,
            discount_percent: None,
            notes: String::new(),
        })
        .await
        .expect("Failed to create invoice")
}

#[tokio::test]
async fn test_expense_roundtrip_and_update() {
    let app = setup().await;

    let id = app
        .expenses
        .create(CreateExpenseCommand {
            category: "Rent".to_string(),
            amount: "1800".parse().expect("Bad amount"),
            date: Utc::now(),
            description: "Workshop rent August".to_string(),
            receipt_number: "2026-08-001".to_string(),
        })
        .await
        .expect("Failed to create expense");

    let expense = app
        .expenses
        .get(GetExpenseQuery {
            expense_id: id.clone(),
        })
        .await
        .expect("Failed to load expense");
    assert_eq!(expense.category(), "Rent");
    assert_eq!(expense.amount().to_string(), "1800");
    assert_eq!(expense.receipt_number(), "2026-08-001");

    app.expenses
        .update(UpdateExpenseCommand {
            expense_id: id.clone(),
            category: "Rent".to_string(),
            amount: "1850.50".parse().expect("Bad amount"),
            date: expense.date(),
            description: "Workshop rent August, adjusted".to_string(),
            receipt_number: "2026-08-001".to_string(),
        })
        .await
        .expect("Failed to update expense");

    let expense = app
        .expenses
        .get(GetExpenseQuery {
            expense_id: id.clone(),
        })
        .await
        .expect("Failed to load expense");
    assert_eq!(expense.amount().to_string(), "1850.50");

    app.expenses
        .delete(DeleteExpenseCommand { expense_id: id.clone() })
        .await
        .expect("Failed to delete expense");
    let gone = app.expenses.get(GetExpenseQuery { expense_id: id }).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_expense_amount_must_be_positive() {
    let app = setup().await;

    let result = app
        .expenses
        .create(CreateExpenseCommand {
            category: "Misc".to_string(),
            amount: "-5".parse().expect("Bad amount"),
            date: Utc::now(),
            description: String::new(),
            receipt_number: String::new(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_list_expenses_by_category_and_range() {
    let app = setup().await;

    create_expense(&app, "Rent", "1200.00", 5).await;
    create_expense(&app, "Tools", "249.90", 10).await;
    create_expense(&app, "Rent", "1200.00", 45).await;

    let rent = app
        .expenses
        .list(ListExpensesQuery {
            filter: ExpenseFilter {
                from: None,
                to: None,
                category: Some("Rent".to_string()),
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list expenses");
    assert_eq!(rent.total, 2);

    let recent = app
        .expenses
        .list(ListExpensesQuery {
            filter: ExpenseFilter {
                from: Some(Utc::now() - Duration::days(30)),
                to: Some(Utc::now()),
                category: None,
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list expenses");
    assert_eq!(recent.total, 2);
    // Newest date first
    assert_eq!(recent.items[0].category(), "Rent");
    assert_eq!(recent.items[1].category(), "Tools");

    let recent_rent = app
        .expenses
        .list(ListExpensesQuery {
            filter: ExpenseFilter {
                from: Some(Utc::now() - Duration::days(30)),
                to: Some(Utc::now()),
                category: Some("Rent".to_string()),
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list expenses");
    assert_eq!(recent_rent.total, 1);
}

#[tokio::test]
async fn test_profit_loss_report() {
    let app = setup().await;
    for (key, value) in [
        (setting_keys::DEFAULT_HOURLY_RATE, "60"),
        (setting_keys::TAX_RATE_PERCENT, "7.7"),
    ] {
        app.settings
            .set(SetSettingCommand {
                key: key.to_string(),
                value: value.to_string(),
                description: String::new(),
            })
            .await
            .expect("Failed to seed rate");
    }

    let paid_id = create_invoice(&app, "OF-2001", true).await;
    create_invoice(&app, "OF-2002", false).await;
    app.invoices
        .mark_paid(MarkInvoicePaidCommand {
            invoice_id: paid_id,
            payment_method: PaymentMethod::Card,
        })
        .await
        .expect("Failed to mark invoice paid");

    create_expense(&app, "Rent", "1200.00", 5).await;
    create_expense(&app, "Tools", "249.90", 10).await;
    // Outside the reporting window
    create_expense(&app, "Fuel", "50.00", 60).await;

    let report = app
        .reports
        .profit_loss(ProfitLossQuery {
            from: Utc::now() - Duration::days(30),
            to: Utc::now() + Duration::days(1),
        })
        .await
        .expect("Failed to build report");

    assert_eq!(report.invoice_count, 2);
    assert_eq!(report.invoiced_total.to_string(), "240.15");
    assert_eq!(report.paid_total.to_string(), "132.45");
    assert_eq!(report.outstanding_total.to_string(), "107.70");
    assert_eq!(report.expense_total.to_string(), "1449.90");
    assert_eq!(report.net_result.to_string(), "-1209.75");

    // Categories come out alphabetically
    assert_eq!(report.expenses_by_category.len(), 2);
    assert_eq!(report.expenses_by_category[0].category, "Rent");
    assert_eq!(report.expenses_by_category[0].total.to_string(), "1200.00");
    assert_eq!(report.expenses_by_category[1].category, "Tools");
    assert_eq!(report.expenses_by_category[1].total.to_string(), "249.90");

    let rendered = profit_loss_csv(&report).expect("Failed to render CSV");
    assert!(rendered.starts_with("Position,Amount\n"));
    assert!(rendered.contains("Invoiced total,240.15\n"));
    assert!(rendered.contains("Expenses (Rent),1200.00\n"));
    assert!(rendered.contains("Net result,-1209.75\n"));
}

#[tokio::test]
async fn test_profit_loss_rejects_inverted_range() {
    let app = setup().await;

    let result = app
        .reports
        .profit_loss(ProfitLossQuery {
            from: Utc::now(),
            to: Utc::now() - Duration::days(1),
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
