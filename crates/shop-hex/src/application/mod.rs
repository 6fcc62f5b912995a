pub mod blog_service;
pub mod cart_sessions;
pub mod catalog_service;
pub mod contact_service;
pub mod order_service;
pub mod storefront;
