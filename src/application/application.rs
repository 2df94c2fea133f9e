use maketree::builder::{BuildError, BuildPolicy, BuildResult, Builder};
use maketree::ext::BestEffortPathExt;
use maketree::normalizer::{Normalizer, PathSet};
use maketree::tree::{ParseError, Parser};
use maketree::validator::{ValidationError, Validator};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{Settings, SettingsError};
use crate::console::Console;

const SOURCE_EXTENSION: &str = "tree";

pub struct Application;

impl Application {
    /// Runs the whole pipeline. Every structural check happens before the
    /// destination is modified.
    pub fn run(cli: Cli) -> Result<BuildResult, ApplicationError> {
        let settings = Settings::read(&cli.config).context(SettingsSnafu)?;
        let config = RuntimeConfig::resolve(cli, settings);
        debug!("Resolved runtime config: {:?}", config);

        let console = Console::new(config.no_color);
        let result = Self::execute(&config, &console)?;
        console.success(format!("Created {result}."));
        Ok(result)
    }

    fn execute(config: &RuntimeConfig, console: &Console) -> Result<BuildResult, ApplicationError> {
        ensure!(
            config.destination.is_dir(),
            DestinationSnafu {
                path: config.destination.best_effort_path_display(),
            }
        );

        if config.source.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
            warn!(
                "Source {} does not have a .{SOURCE_EXTENSION} extension",
                config.source.display()
            );
        }

        let forest = Parser::parse_file(&config.source).context(ParseSnafu)?;
        ensure!(
            !forest.is_empty(),
            EmptySourceSnafu {
                path: config.source.best_effort_path_display(),
            }
        );

        let validator = Validator::new(config.platform);
        Validator::check_duplicates(&forest).context(ValidationSnafu)?;
        validator.validate_tree(&forest).context(ValidationSnafu)?;

        let paths = Normalizer::normalize(&forest);
        Self::check_conflicts(config, &paths, console)?;

        let result = Builder::new(&config.destination, config.policy)
            .build(&paths)
            .context(BuildSnafu)?;
        info!("Build finished: {result}");
        Ok(result)
    }

    /// Existing directories are reused, but anything else standing where a
    /// directory should go aborts the run. Existing files abort only when no
    /// skip or overwrite policy was chosen.
    fn check_conflicts(
        config: &RuntimeConfig,
        paths: &PathSet,
        console: &Console,
    ) -> Result<(), ApplicationError> {
        let root = config.destination.as_path();

        let existing_directories = Validator::existing_paths(root, paths.directories());
        if !existing_directories.is_empty() {
            debug!(
                "{} directories already exist and will be kept",
                existing_directories.len()
            );
        }
        let blocked = existing_directories
            .into_iter()
            .filter(|dir| !root.join(dir).is_dir())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if !blocked.is_empty() {
            console.warning("Non-directory entries are in the way of planned directories:");
            console.list(&blocked);
            return BlockedDirectoriesSnafu { paths: blocked }.fail();
        }

        let existing_files = Validator::existing_paths(root, paths.files())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if existing_files.is_empty() {
            return Ok(());
        }

        match config.policy {
            BuildPolicy::FailOnExisting => {
                console.warning("Files already exist:");
                console.list(&existing_files);
                ExistingFilesSnafu {
                    paths: existing_files,
                }
                .fail()
            }
            BuildPolicy::Skip => {
                warn!("Skipping {} existing files", existing_files.len());
                Ok(())
            }
            BuildPolicy::Overwrite => {
                warn!("Overwriting {} existing files", existing_files.len());
                Ok(())
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    SettingsError { source: SettingsError },
    #[snafu(display("Destination {} does not exist or is not a directory", path))]
    DestinationError { path: String },
    #[snafu(display("Critical failure encountered while reading the tree source"))]
    ParseError { source: ParseError },
    #[snafu(display("Tree source {} does not describe any entry", path))]
    EmptySourceError { path: String },
    #[snafu(display("The tree source is malformed"))]
    ValidationError { source: ValidationError },
    #[snafu(display(
        "{} planned directories are blocked by existing entries",
        paths.len()
    ))]
    BlockedDirectoriesError { paths: Vec<String> },
    #[snafu(display(
        "{} files already exist, use --skip or --overwrite to proceed",
        paths.len()
    ))]
    ExistingFilesError { paths: Vec<String> },
    #[snafu(display("Critical failure encountered while creating the tree"))]
    BuildError { source: BuildError },
}
