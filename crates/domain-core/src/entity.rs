//! Entity base traits

use werkstatt_common::AuditInfo;

/// Entity trait
pub trait Entity {
    type Id;

    fn id(&self) -> &Self::Id;
}

/// Aggregate root trait
pub trait AggregateRoot: Entity {
    fn audit_info(&self) -> &AuditInfo;
    fn audit_info_mut(&mut self) -> &mut AuditInfo;
}
