pub mod list;
pub mod new_bill;
pub mod rebuild;
