pub mod blog;
pub mod cart;
pub mod contact;
pub mod order;
pub mod pricing;
pub mod product;
