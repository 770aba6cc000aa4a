#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod selector;
pub mod session;

pub use error::Error;
