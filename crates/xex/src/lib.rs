pub mod config;
pub mod error;
pub mod remote;
pub mod services;
pub mod timeframe;
pub mod traits;

pub use config::XexConfig;
pub use error::XexError;
pub use services::order_requests::OrderType;
pub use services::xex_exchange::Xex;
