//! Identifier and location types.
//!
//! These types enforce the store's key rules at construction time,
//! so a malformed id never reaches a backend.

mod collection_name;
mod record_id;
mod store_url;

pub use collection_name::CollectionName;
pub use record_id::RecordId;
pub use store_url::StoreUrl;
