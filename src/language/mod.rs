// Types representing messages seen in an ssh-chat room

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
