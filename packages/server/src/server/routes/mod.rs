// HTTP routes
pub mod check_product;
pub mod health;
pub mod root;

pub use check_product::*;
pub use health::*;
pub use root::*;
