pub mod builder;
pub mod combiner;
pub mod consistency;
pub mod deployments;
pub mod error;
pub mod payload;
pub mod persistence;
pub mod snapshots;
pub mod transaction;

pub use error::{Error, Result};
