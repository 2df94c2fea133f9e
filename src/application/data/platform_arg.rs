use clap::ValueEnum;
use maketree::validator::PlatformPolicy;

/// Platform whose naming rules a run validates against.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlatformArg {
    Windows,
    Unix,
}

impl From<PlatformArg> for PlatformPolicy {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Windows => PlatformPolicy::Windows,
            PlatformArg::Unix => PlatformPolicy::UnixLike,
        }
    }
}
