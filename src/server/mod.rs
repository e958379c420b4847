mod billboard_routes;
pub mod config;
mod error;
mod http_layers;
mod party_routes;
mod records;
mod rental_routes;
mod report_routes;
#[allow(clippy::module_inception)]
pub mod server;
pub(self) mod session;
pub mod state;
mod user_routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::{make_app, run_server};
