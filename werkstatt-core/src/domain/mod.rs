//! Domain layer
//!
//! Entities, value objects, enums, the pricing computation and the
//! repository interfaces.

pub mod entities;
pub mod enums;
pub mod pricing;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use enums::*;
pub use pricing::*;
pub use repositories::*;
pub use value_objects::*;
