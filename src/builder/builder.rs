use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;

use derive_more::Display;
use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::builder::BuildPolicy;
use crate::normalizer::PathSet;

/// Number of entries a build actually created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[display("{directories_created} directories and {files_created} files")]
pub struct BuildResult {
    pub directories_created: usize,
    /// Overwritten files are counted as created
    pub files_created: usize,
}

impl From<BuildResult> for (usize, usize) {
    fn from(result: BuildResult) -> Self {
        (result.directories_created, result.files_created)
    }
}

/// Creates planned paths below a destination root.
///
/// All directories are created before any file. Nothing is rolled back on
/// failure: entries created so far stay on disk and the error names the
/// path that failed.
#[derive(Debug, Clone)]
pub struct Builder {
    root: PathBuf,
    policy: BuildPolicy,
}

impl Builder {
    /// `root` must already exist and be a directory.
    pub fn new(root: impl Into<PathBuf>, policy: BuildPolicy) -> Self {
        Builder {
            root: root.into(),
            policy,
        }
    }

    pub fn build(&self, paths: &PathSet) -> Result<BuildResult, BuildError> {
        debug!(
            "Building {} directories and {} files in {} with policy '{}'",
            paths.directory_count(),
            paths.file_count(),
            self.root.display(),
            self.policy
        );

        let directories_created = self.create_directories(paths.directories())?;
        let files_created = self.create_files(paths.files())?;

        Ok(BuildResult {
            directories_created,
            files_created,
        })
    }

    /// Directories that already exist are kept and not counted.
    fn create_directories<'a>(
        &self,
        directories: impl Iterator<Item = &'a str>,
    ) -> Result<usize, BuildError> {
        let mut count = 0;
        for directory in directories {
            let path = self.root.join(directory);
            match fs::create_dir(&path) {
                Ok(()) => {
                    info!("Created directory '{directory}'");
                    count += 1;
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    ensure!(path.is_dir(), DirectoryCollisionSnafu { path });
                    info!("Skipping directory '{directory}', already exists");
                }
                Err(err) => return Err(err).context(CreateDirectorySnafu { path }),
            }
        }
        Ok(count)
    }

    fn create_files<'a>(&self, files: impl Iterator<Item = &'a str>) -> Result<usize, BuildError> {
        let mut count = 0;
        for file in files {
            let path = self.root.join(file);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    info!("Created file '{file}'");
                    count += 1;
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => match self.policy {
                    BuildPolicy::Skip => {
                        info!("Skipping file '{file}', already exists");
                    }
                    BuildPolicy::Overwrite => {
                        File::create(&path).context(OverwriteFileSnafu { path: &path })?;
                        info!("Overwrote file '{file}'");
                        count += 1;
                    }
                    BuildPolicy::FailOnExisting => return FileExistsSnafu { path }.fail(),
                },
                Err(err) => return Err(err).context(CreateFileSnafu { path }),
            }
        }
        Ok(count)
    }
}

#[derive(Debug, Snafu)]
pub enum BuildError {
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Cannot create directory {}, a non-directory is in the way", path.display()))]
    DirectoryCollisionError { path: PathBuf },
    #[snafu(display("Failed to create file {}", path.display()))]
    CreateFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to overwrite file {}", path.display()))]
    OverwriteFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "File {} already exists and no skip or overwrite policy is set",
        path.display()
    ))]
    FileExistsError { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use crate::tree::Parser;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    const PROJECT: &str = "project/\n    src/\n        main.ext\n    README.md\n";

    fn plan(src: &str) -> PathSet {
        Normalizer::normalize(&Parser::parse_str(src))
    }

    fn write_content(path: &Path, content: &str) {
        let mut file = File::create(path).expect("Failed to create file");
        write!(file, "{content}").expect("Failed to write to file");
    }

    #[test]
    fn builds_the_project_example_into_an_empty_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let builder = Builder::new(temp_dir.path(), BuildPolicy::FailOnExisting);

        let result = builder.build(&plan(PROJECT)).expect("Build failed");

        assert_eq!(<(usize, usize)>::from(result), (2, 2));
        assert!(temp_dir.path().join("project/src").is_dir());
        let main = temp_dir.path().join("project/src/main.ext");
        assert!(main.is_file());
        assert_eq!(fs::metadata(main).expect("Missing file").len(), 0);
        assert!(temp_dir.path().join("project/README.md").is_file());
    }

    #[test]
    fn second_run_with_skip_creates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let builder = Builder::new(temp_dir.path(), BuildPolicy::Skip);
        let paths = plan(PROJECT);

        let first = builder.build(&paths).expect("First build failed");
        let second = builder.build(&paths).expect("Second build failed");

        assert_eq!(first, BuildResult {
            directories_created: 2,
            files_created: 2
        });
        assert_eq!(second, BuildResult::default());
    }

    #[test]
    fn skip_leaves_existing_content_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        write_content(&temp_dir.path().join("notes.txt"), "keep me");

        let result = Builder::new(temp_dir.path(), BuildPolicy::Skip)
            .build(&plan("notes.txt\nother.txt\n"))
            .expect("Build failed");

        assert_eq!(result.files_created, 1);
        let content = fs::read_to_string(temp_dir.path().join("notes.txt")).expect("Read failed");
        assert_eq!(content, "keep me");
    }

    #[test]
    fn overwrite_truncates_and_counts_existing_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("project")).expect("Failed to create dir");
        let readme = temp_dir.path().join("project/README.md");
        write_content(&readme, "old content");

        let result = Builder::new(temp_dir.path(), BuildPolicy::Overwrite)
            .build(&plan(PROJECT))
            .expect("Build failed");

        assert_eq!(result, BuildResult {
            directories_created: 1,
            files_created: 2
        });
        assert_eq!(fs::metadata(readme).expect("Missing file").len(), 0);
    }

    #[test]
    fn existing_file_without_policy_fails_after_creating_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        write_content(&temp_dir.path().join("README.md"), "taken");

        let result = Builder::new(temp_dir.path(), BuildPolicy::FailOnExisting)
            .build(&plan("docs/\nREADME.md\n"));

        match result {
            Err(BuildError::FileExistsError { path }) => {
                assert_eq!(path, temp_dir.path().join("./README.md"));
            }
            other => panic!("Expected FileExistsError, got {other:?}"),
        }
        assert!(temp_dir.path().join("docs").is_dir());
    }

    #[test]
    fn restated_parent_builds_in_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = Builder::new(temp_dir.path(), BuildPolicy::FailOnExisting)
            .build(&plan("a/\n    b/\na/\n"))
            .expect("Build failed");

        assert_eq!(<(usize, usize)>::from(result), (2, 0));
        assert!(temp_dir.path().join("a/b").is_dir());
    }

    #[test]
    fn existing_directories_are_not_counted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("project")).expect("Failed to create dir");

        let result = Builder::new(temp_dir.path(), BuildPolicy::FailOnExisting)
            .build(&plan("project/\n    src/\n"))
            .expect("Build failed");

        assert_eq!(result.directories_created, 1);
    }

    #[test]
    fn file_in_place_of_a_directory_is_a_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        write_content(&temp_dir.path().join("project"), "not a dir");

        let result = Builder::new(temp_dir.path(), BuildPolicy::Overwrite).build(&plan(PROJECT));

        match result {
            Err(BuildError::DirectoryCollisionError { path }) => {
                assert_eq!(path, temp_dir.path().join("./project"));
            }
            other => panic!("Expected DirectoryCollisionError, got {other:?}"),
        }
    }

    #[test]
    fn missing_destination_surfaces_the_failing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing_root = temp_dir.path().join("missing");

        let result = Builder::new(&missing_root, BuildPolicy::Skip).build(&plan("a/\n"));

        match result {
            Err(BuildError::CreateDirectoryError { path, source }) => {
                assert_eq!(path, missing_root.join("./a"));
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("Expected CreateDirectoryError, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn overwriting_a_directory_fails_with_its_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("data.json")).expect("Failed to create dir");

        let result =
            Builder::new(temp_dir.path(), BuildPolicy::Overwrite).build(&plan("data.json\n"));

        assert!(matches!(
            result,
            Err(BuildError::OverwriteFileError { ref path, .. }) if path.ends_with("data.json")
        ));
    }

    #[test]
    fn error_messages_name_the_path() {
        let error = BuildError::FileExistsError {
            path: PathBuf::from("/tmp/dest/./README.md"),
        };
        assert!(error.to_string().contains("/tmp/dest/./README.md"));
    }

    #[test]
    fn build_result_display() {
        let result = BuildResult {
            directories_created: 3,
            files_created: 1,
        };
        assert_eq!(result.to_string(), "3 directories and 1 files");
    }
}
