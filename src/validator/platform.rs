use derive_more::Display;

/// Naming rules of the platform the tree is generated for.
///
/// Resolved once per run and passed explicitly, so every policy can be
/// exercised regardless of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PlatformPolicy {
    #[display("windows")]
    Windows,
    #[display("unix")]
    UnixLike,
}

impl PlatformPolicy {
    pub fn host() -> Self {
        if cfg!(windows) {
            PlatformPolicy::Windows
        } else {
            PlatformPolicy::UnixLike
        }
    }

    /// Characters that may not appear anywhere in a name.
    ///
    /// The Unix-like set is stricter than the filesystem requires so that
    /// generated trees stay portable.
    pub fn illegal_chars(&self) -> &'static [char] {
        match self {
            PlatformPolicy::Windows => &['\\', '/', ':', '?', '*', '<', '>', '"', '|'],
            PlatformPolicy::UnixLike => &['/', ':', '<', '>'],
        }
    }

    /// Windows rejects names with leading or trailing spaces.
    pub fn forbids_edge_spaces(&self) -> bool {
        matches!(self, PlatformPolicy::Windows)
    }
}
