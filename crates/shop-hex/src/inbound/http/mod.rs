mod handlers;
mod server;
mod session;

pub use server::{router, HttpServer, HttpServerConfig};
pub use session::{CartSession, SESSION_HEADER};
