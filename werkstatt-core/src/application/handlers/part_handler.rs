//! Spare part handler

use std::sync::Arc;

use tracing::{info, warn};
use werkstatt_common::PagedResult;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Part, StockMovement};
use crate::domain::repositories::{OrderRepository, PartRepository};
use crate::domain::value_objects::{PartId, Sku};

use crate::application::commands::*;
use crate::application::queries::*;

pub struct PartHandler {
    part_repo: Arc<dyn PartRepository>,
    order_repo: Arc<dyn OrderRepository>,
}

impl PartHandler {
    pub fn new(part_repo: Arc<dyn PartRepository>, order_repo: Arc<dyn OrderRepository>) -> Self {
        Self {
            part_repo,
            order_repo,
        }
    }

    /// Create a part
    pub async fn create(&self, cmd: CreatePartCommand) -> AppResult<PartId> {
        cmd.validate()?;

        let sku = Sku::new(cmd.sku).map_err(|e| AppError::validation(e.to_string()))?;
        if self.part_repo.exists_by_sku(&sku).await? {
            return Err(AppError::constraint(format!(
                "part number {} already exists",
                sku
            )));
        }

        let part = Part::new(sku, cmd.description, cmd.purchase_price, cmd.sale_price)
            .with_category(cmd.category)
            .with_stock(cmd.stock_quantity, cmd.min_stock)
            .with_supplier(cmd.supplier)
            .with_storage_location(cmd.storage_location)
            .with_unit(cmd.unit);

        self.part_repo.save(&part).await?;

        info!("Part created: {} ({})", part.sku(), part.id().0);
        Ok(part.id().clone())
    }

    /// Update a part. The part number itself is fixed.
    pub async fn update(&self, cmd: UpdatePartCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut part = self
            .part_repo
            .find_by_id(&cmd.part_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", cmd.part_id)))?;

        part.update_details(
            cmd.description,
            cmd.category,
            cmd.supplier,
            cmd.storage_location,
            cmd.unit,
        );
        part.update_prices(cmd.purchase_price, cmd.sale_price);
        part.set_min_stock(cmd.min_stock)?;
        if let Some(quantity) = cmd.stock_quantity {
            part.set_stock(quantity)?;
        }

        self.part_repo.update(&part).await?;

        info!("Part updated: {}", part.sku());
        Ok(())
    }

    /// Apply a relative stock change and return the new count.
    ///
    /// The movement record is best effort: once the new count is stored,
    /// a failure to append the history entry is logged and swallowed.
    pub async fn adjust_stock(&self, cmd: AdjustStockCommand) -> AppResult<i64> {
        cmd.validate()?;

        let mut part = self
            .part_repo
            .find_by_id(&cmd.part_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", cmd.part_id)))?;

        let applied = part.adjust_stock(cmd.change);
        if applied != cmd.change {
            warn!(
                "Stock of {} clamped at zero: requested {}, applied {}",
                part.sku(),
                cmd.change,
                applied
            );
        }

        self.part_repo.update(&part).await?;

        let movement =
            StockMovement::new(part.id().clone(), applied, part.stock_quantity(), cmd.note);
        if let Err(e) = self.part_repo.save_movement(&movement).await {
            warn!("Could not record stock movement for {}: {}", part.sku(), e);
        }

        if part.is_below_minimum() {
            info!(
                "Part {} is at or below minimum stock ({} <= {})",
                part.sku(),
                part.stock_quantity(),
                part.min_stock()
            );
        }

        Ok(part.stock_quantity())
    }

    /// Delete a part. Refused while any order line references it.
    pub async fn delete(&self, cmd: DeletePartCommand) -> AppResult<()> {
        let part = self
            .part_repo
            .find_by_id(&cmd.part_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", cmd.part_id)))?;

        if self.order_repo.exists_line_for_part(&cmd.part_id).await? {
            warn!(
                "Refusing to delete part {}: referenced by order lines",
                part.sku()
            );
            return Err(AppError::constraint(format!(
                "part {} is used by at least one order",
                part.sku()
            )));
        }

        self.part_repo.delete(&cmd.part_id).await?;

        info!("Part deleted: {}", part.sku());
        Ok(())
    }

    /// Get a part
    pub async fn get(&self, query: GetPartQuery) -> AppResult<Part> {
        self.part_repo
            .find_by_id(&query.part_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", query.part_id)))
    }

    /// Get a part by number
    pub async fn get_by_sku(&self, query: GetPartBySkuQuery) -> AppResult<Part> {
        self.part_repo
            .find_by_sku(&query.sku)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", query.sku)))
    }

    /// List parts
    pub async fn list(&self, query: ListPartsQuery) -> AppResult<PagedResult<Part>> {
        self.part_repo.list(query.filter, query.pagination).await
    }

    /// Movement history of a part
    pub async fn movements(
        &self,
        query: ListStockMovementsQuery,
    ) -> AppResult<PagedResult<StockMovement>> {
        self.part_repo
            .list_movements(&query.part_id, query.pagination)
            .await
    }
}
