//! Stock movement audit record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PartId, StockMovementId};

/// One applied stock change of a part, kept as an append-only trail.
///
/// `change` is the applied delta after clamping, which can differ from the
/// requested one when a withdrawal ran past zero. `stock_after` is the
/// count right after the change, so the trail replays without the part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    id: StockMovementId,
    part_id: PartId,
    change: i64,
    stock_after: i64,
    note: String,
    created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn new(part_id: PartId, change: i64, stock_after: i64, note: impl Into<String>) -> Self {
        Self {
            id: StockMovementId::new(),
            part_id,
            change,
            stock_after,
            note: note.into(),
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: StockMovementId,
        part_id: PartId,
        change: i64,
        stock_after: i64,
        note: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            part_id,
            change,
            stock_after,
            note,
            created_at,
        }
    }

    pub fn id(&self) -> &StockMovementId {
        &self.id
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    pub fn change(&self) -> i64 {
        self.change
    }

    pub fn stock_after(&self) -> i64 {
        self.stock_after
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_inbound(&self) -> bool {
        self.change > 0
    }
}
