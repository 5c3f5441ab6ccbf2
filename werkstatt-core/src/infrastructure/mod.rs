//! Infrastructure layer

pub mod export;
pub mod persistence;
