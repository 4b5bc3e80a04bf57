pub mod client;
pub mod error;
pub mod identifier;
pub mod normalize;
pub mod types;

pub use client::{CancelToken, CatalogClient, CatalogFetchResult, FetchOutcome};
pub use error::FetchError;
pub use identifier::{normalize_store_identifier, StoreHost};
pub use normalize::{normalize_product, normalize_products};
pub use types::{RawCollection, RawProduct, RawVariant};
