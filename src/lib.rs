//! Bookdesk list client
//!
//! Typed client-side core shared by the library lending and book order
//! admin panels: paginated, searchable and filterable lists over
//! `/api/<entity>` collection endpoints, whichever response shape the
//! backend uses.

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod query;
pub mod telemetry;

pub use api::{CollectionEndpoint, HttpCollectionClient, ListRequest};
pub use config::AppConfig;
pub use controller::{ControllerEvent, ListController, Notice};
pub use error::{ClientError, ClientResult};
pub use normalize::PageResult;
