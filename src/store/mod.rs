pub mod ephemeral;
pub mod token;

pub use ephemeral::{EphemeralRecord, EphemeralStore, DEFAULT_TTL_SECS};
pub use token::Token;
