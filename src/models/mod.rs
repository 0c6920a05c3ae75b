//! Typed record schemas for every listed collection

pub mod book;
pub mod catalog;
pub mod enums;
pub mod lenient;
pub mod order;
pub mod reader;

use serde::de::DeserializeOwned;

// Re-export commonly used types
pub use book::Book;
pub use catalog::{ActivityLog, Category, Language};
pub use enums::{Availability, EntityKind, OrderStatus};
pub use order::Order;
pub use reader::{Interest, Reader};

/// A record type served by one collection endpoint
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;
}
