//! werkstatt-domain-core - entity traits and domain primitives

pub mod entity;
pub mod money;

pub use entity::*;
pub use money::*;
