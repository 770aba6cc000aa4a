#![forbid(unsafe_code)]

pub mod csv_source;
pub mod provider;

pub use csv_source::decode_csv;
pub use provider::{
    CachedDatasetProvider, DatasetError, DatasetProvider, InMemoryDatasetProvider,
};
