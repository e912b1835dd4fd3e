pub mod get2fa;
pub mod help;

pub use get2fa::get2fa;
pub use help::help;

use crate::bot::Data;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Get all registered commands
pub fn all_commands() -> Vec<poise::Command<Data, Error>> {
    vec![get2fa(), help()]
}
