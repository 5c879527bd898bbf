//! Marketplace domain: records, the pure engines over them, and the error taxonomy.

pub mod availability;
pub mod context;
pub mod error;
pub mod favorite_cache;
pub mod filter;
pub mod model;
pub mod pricing;
