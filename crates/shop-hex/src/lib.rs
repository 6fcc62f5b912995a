//! shop-hex: storefront core (cart sessions, catalog, checkout) plus the
//! inbound HTTP adapter.

pub mod config;
pub mod errors;

pub mod application;

pub use shop_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
