mod log_level;
mod platform_arg;

pub use log_level::LogLevel;
pub use platform_arg::PlatformArg;
