//! Legality checks for parsed trees.
//!
//! Name rules are pure and depend only on the [`PlatformPolicy`] handed to
//! the [`Validator`]. Tree rules reuse them, and the existing-path checks
//! are the only part that touches the filesystem.

mod name_rules;
mod platform;
mod validator;

pub use name_rules::{InvalidName, MAX_NAME_LENGTH};
pub use platform::PlatformPolicy;
pub use validator::{ValidationError, Validator};
