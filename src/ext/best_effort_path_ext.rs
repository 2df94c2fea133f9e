use std::path::{Path, PathBuf, absolute};

/// Renders a path for messages: canonical when it exists, otherwise made
/// absolute against the working directory, otherwise as given.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        let path = self.as_ref();
        path.canonicalize()
            .or_else(|_| absolute(path))
            .unwrap_or_else(|_| PathBuf::from(path))
            .display()
            .to_string()
    }
}
