use derive_more::Display;

/// What to do with a planned file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum BuildPolicy {
    /// Refuse to touch it
    #[default]
    #[display("error")]
    FailOnExisting,
    /// Leave it as it is
    #[display("skip")]
    Skip,
    /// Truncate it to empty
    #[display("overwrite")]
    Overwrite,
}

impl BuildPolicy {
    /// Maps the `skip`/`overwrite` flag pair. The caller keeps the flags
    /// mutually exclusive; `skip` wins if both are set.
    pub fn from_flags(skip: bool, overwrite: bool) -> Self {
        match (skip, overwrite) {
            (true, _) => BuildPolicy::Skip,
            (false, true) => BuildPolicy::Overwrite,
            (false, false) => BuildPolicy::FailOnExisting,
        }
    }
}
