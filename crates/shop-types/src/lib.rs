//! shop-types: storefront domain (catalog, cart, pricing, orders, content) and ports

pub mod domain;
pub mod ports;
