pub mod bill;
pub mod receipt;
pub mod user;
