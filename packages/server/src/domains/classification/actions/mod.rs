//! Classification domain actions - entry-point business logic
//!
//! Called directly from HTTP handlers. Actions take raw input and return
//! final results.

pub mod check_product;

pub use check_product::check_product;
