pub mod context;
pub mod errors;
pub mod header;
pub mod price;
