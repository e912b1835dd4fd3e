pub mod bot;
pub mod config;
pub mod error;
pub mod logging;
pub mod otp;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
