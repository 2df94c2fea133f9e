//! Materializes a [`crate::normalizer::PathSet`] on disk.

mod builder;
mod policy;

pub use builder::{BuildError, BuildResult, Builder};
pub use policy::BuildPolicy;
