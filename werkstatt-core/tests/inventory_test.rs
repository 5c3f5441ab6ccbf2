use std::sync::Arc;

use rust_decimal::Decimal;
use werkstatt_common::Pagination;
use werkstatt_core::application::commands::{
    AddOrderLineCommand, AdjustStockCommand, CreateCustomerCommand, CreateOrderCommand,
    CreatePartCommand, DeletePartCommand, UpdatePartCommand,
};
use werkstatt_core::application::handlers::{
    CustomerHandler, OrderHandler, PartHandler, ReportHandler,
};
use werkstatt_core::application::queries::{
    GetPartBySkuQuery, GetPartQuery, ListPartsQuery, ListStockMovementsQuery,
};
use werkstatt_core::domain::entities::PartFilter;
use werkstatt_core::domain::enums::OrderPriority;
use werkstatt_core::domain::repositories::{
    CustomerRepository, ExpenseRepository, InvoiceRepository, OrderRepository, PartRepository,
    SettingRepository, VehicleRepository,
};
use werkstatt_core::domain::value_objects::{PartId, Sku};
use werkstatt_core::infrastructure::export::inventory_csv;
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
    reports: ReportHandler,
}

async fn setup() -> App {
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
            order_repo,
            customer_repo,
            vehicle_repo,
            part_repo.clone(),
            invoice_repo.clone(),
            setting_repo,
        ),
        reports: ReportHandler::new(invoice_repo, expense_repo, part_repo),
    }
}

fn part_command(sku: &str, description: &str) -> CreatePartCommand {
    CreatePartCommand {
        sku: sku.to_string(),
        description: description.to_string(),
        category: "Brakes".to_string(),
        stock_quantity: 8,
        min_stock: 2,
        purchase_price: "22.50".parse().expect("Bad price"),
        sale_price: "39.90".parse().expect("Bad price"),
        supplier: "Hostettler".to_string(),
        storage_location: "A-03".to_string(),
        unit: "set".to_string(),
    }
}

async fn create_part(app: &App, sku: &str, description: &str) -> PartId {
    app.parts
        .create(part_command(sku, description))
        .await
        .expect("Failed to create part")
}

#[tokio::test]
async fn test_create_part_and_find_by_normalized_sku() {
    let app = setup().await;

    let id = create_part(&app, "bp-1044", "Brake pad set").await;

    // The number is stored uppercase and lookups normalize the same way
    let part = app
        .parts
        .get_by_sku(GetPartBySkuQuery {
            sku: Sku::new("bp-1044").expect("Bad part number"),
        })
        .await
        .expect("Failed to find part");
    assert_eq!(part.id(), &id);
    assert_eq!(part.sku().as_str(), "BP-1044");
    assert_eq!(part.description(), "Brake pad set");
    assert_eq!(part.stock_quantity(), 8);
    assert_eq!(part.storage_location(), "A-03");
}

#[tokio::test]
async fn test_duplicate_sku_refused() {
    let app = setup().await;

    create_part(&app, "BP-1044", "Brake pad set").await;

    // Same number in different case counts as a duplicate
    let duplicate = app.parts.create(part_command("bp-1044", "Other pads")).await;
    assert!(matches!(duplicate, Err(AppError::Constraint(_))));
}

#[tokio::test]
async fn test_adjust_stock_records_movements() {
    let app = setup().await;

    let part_id = create_part(&app, "BP-1044", "Brake pad set").await;

    let after = app
        .parts
        .adjust_stock(AdjustStockCommand {
            part_id: part_id.clone(),
            change: 5,
            note: "Delivery".to_string(),
        })
        .await
        .expect("Failed to adjust stock");
    assert_eq!(after, 13);

    let after = app
        .parts
        .adjust_stock(AdjustStockCommand {
            part_id: part_id.clone(),
            change: -4,
            note: "Used on order".to_string(),
        })
        .await
        .expect("Failed to adjust stock");
    assert_eq!(after, 9);

    // Newest first
    let movements = app
        .parts
        .movements(ListStockMovementsQuery {
            part_id,
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list movements");
    assert_eq!(movements.total, 2);
    assert_eq!(movements.items[0].change(), -4);
    assert_eq!(movements.items[0].stock_after(), 9);
    assert_eq!(movements.items[0].note(), "Used on order");
    assert!(!movements.items[0].is_inbound());
    assert_eq!(movements.items[1].change(), 5);
    assert_eq!(movements.items[1].stock_after(), 13);
    assert!(movements.items[1].is_inbound());
}

#[tokio::test]
async fn test_stock_never_goes_below_zero() {
    let app = setup().await;

    let part_id = create_part(&app, "BP-1044", "Brake pad set").await;

    // The part starts at 8; removing 20 only removes what is there
    let after = app
        .parts
        .adjust_stock(AdjustStockCommand {
            part_id: part_id.clone(),
            change: -20,
            note: "Inventory correction".to_string(),
        })
        .await
        .expect("Failed to adjust stock");
    assert_eq!(after, 0);

    let movements = app
        .parts
        .movements(ListStockMovementsQuery {
            part_id,
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list movements");
    assert_eq!(movements.items[0].change(), -8);
    assert_eq!(movements.items[0].stock_after(), 0);
}

#[tokio::test]
async fn test_list_parts_with_filters() {
    let app = setup().await;

    create_part(&app, "BP-1044", "Brake pad set").await;
    let filter_id = app
        .parts
        .create(CreatePartCommand {
            sku: "OF-2001".to_string(),
            description: "Oil filter".to_string(),
            category: "Filters".to_string(),
            stock_quantity: 1,
            min_stock: 3,
            purchase_price: "9.80".parse().expect("Bad price"),
            sale_price: "16.49".parse().expect("Bad price"),
            supplier: String::new(),
            storage_location: String::new(),
            unit: "piece".to_string(),
        })
        .await
        .expect("Failed to create part");
    // Zero threshold means never low, whatever the count
    app.parts
        .create(CreatePartCommand {
            sku: "WS-0100".to_string(),
            description: "Wiper blade".to_string(),
            category: "Exterior".to_string(),
            stock_quantity: 0,
            min_stock: 0,
            purchase_price: "4.20".parse().expect("Bad price"),
            sale_price: "9.90".parse().expect("Bad price"),
            supplier: String::new(),
            storage_location: String::new(),
            unit: "piece".to_string(),
        })
        .await
        .expect("Failed to create part");

    // Search matches number and description
    let page = app
        .parts
        .list(ListPartsQuery {
            filter: PartFilter {
                search_term: Some("filter".to_string()),
                category: None,
                below_minimum: false,
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list parts");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].sku().as_str(), "OF-2001");

    let page = app
        .parts
        .list(ListPartsQuery {
            filter: PartFilter {
                search_term: None,
                category: Some("Brakes".to_string()),
                below_minimum: false,
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list parts");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].sku().as_str(), "BP-1044");

    let page = app
        .parts
        .list(ListPartsQuery {
            filter: PartFilter {
                search_term: None,
                category: None,
                below_minimum: true,
            },
            pagination: Pagination::default(),
        })
        .await
        .expect("Failed to list parts");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id(), &filter_id);
}

#[tokio::test]
async fn test_update_part_sets_stock_only_when_given() {
    let app = setup().await;

    let part_id = create_part(&app, "BP-1044", "Brake pad set").await;

    let mut cmd = UpdatePartCommand {
        part_id: part_id.clone(),
        description: "Brake pad set front".to_string(),
        category: "Brakes".to_string(),
        stock_quantity: None,
        min_stock: 4,
        purchase_price: "23.10".parse().expect("Bad price"),
        sale_price: "41.50".parse().expect("Bad price"),
        supplier: "Hostettler".to_string(),
        storage_location: "A-04".to_string(),
        unit: "set".to_string(),
    };
    app.parts
        .update(cmd.clone())
        .await
        .expect("Failed to update part");

    let part = app
        .parts
        .get(GetPartQuery {
            part_id: part_id.clone(),
        })
        .await
        .expect("Failed to load part");
    assert_eq!(part.description(), "Brake pad set front");
    assert_eq!(part.stock_quantity(), 8);
    assert_eq!(part.min_stock(), 4);

    cmd.stock_quantity = Some(12);
    app.parts
        .update(cmd)
        .await
        .expect("Failed to update part");

    let part = app
        .parts
        .get(GetPartQuery { part_id })
        .await
        .expect("Failed to load part");
    assert_eq!(part.stock_quantity(), 12);
}

#[tokio::test]
async fn test_delete_part_used_by_order_refused() {
    let app = setup().await;

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

    let used = create_part(&app, "BP-1044", "Brake pad set").await;
    let unused = create_part(&app, "OF-2001", "Oil filter").await;

    let order_id = app
        .orders
        .create(CreateOrderCommand {
            customer_id,
            vehicle_id: None,
            title: "Brake service".to_string(),
            description: String::new(),
            priority: OrderPriority::High,
            labor_hours: Decimal::ZERO,
        })
        .await
        .expect("Failed to create order");
    app.orders
        .add_line(AddOrderLineCommand {
            order_id,
            part_id: used.clone(),
            quantity: 1,
            discount_percent: Decimal::ZERO,
            unit_price: None,
        })
        .await
        .expect("Failed to add line");

    let refused = app.parts.delete(DeletePartCommand { part_id: used }).await;
    assert!(matches!(refused, Err(AppError::Constraint(_))));

    app.parts
        .delete(DeletePartCommand { part_id: unused })
        .await
        .expect("Failed to delete part");
}

#[tokio::test]
async fn test_inventory_export_values_stock() {
    let app = setup().await;

    create_part(&app, "BP-1044", "Brake pad set").await;
    create_part(&app, "OF-2001", "Oil filter").await;

    let parts = app.reports.inventory().await.expect("Failed to load parts");
    assert_eq!(parts.len(), 2);
    // list_all is ordered by number
    assert_eq!(parts[0].sku().as_str(), "BP-1044");

    let rendered = inventory_csv(&parts).expect("Failed to render CSV");
    let mut lines = rendered.lines();
    assert_eq!(
        lines.next().expect("Missing header"),
        "SKU,Description,Category,Stock,Minimum,Unit,Purchase price,Sale price,Supplier,Storage location,Stock value"
    );
    // 8 sets at 22.50 purchase
    let first = lines.next().expect("Missing row");
    assert!(first.starts_with("BP-1044,Brake pad set,Brakes,8,2,set,22.50,39.90,"));
    assert!(first.ends_with(",180.00"));
}
