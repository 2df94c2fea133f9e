use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use maketree::builder::BuildPolicy;
use maketree::ext::BestEffortPathExt;
use maketree::validator::PlatformPolicy;

pub const SETTINGS_FILE_NAME: &str = ".maketree.yaml";

const CONFLICT_KEY: &str = "conflict";
const PLATFORM_KEY: &str = "platform";

/// Defaults read from an optional YAML file. Command line flags take
/// precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub conflict: Option<BuildPolicy>,
    pub platform: Option<PlatformPolicy>,
}

impl Settings {
    /// A missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        debug!("Reading settings from {}", path.best_effort_path_display());
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.best_effort_path_display(),
                });
            }
        };

        let settings: Self = contents.as_str().try_into()?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    fn parse_conflict(value: &Yaml) -> Result<BuildPolicy, SettingsError> {
        match value.as_str() {
            Some("error") => Ok(BuildPolicy::FailOnExisting),
            Some("skip") => Ok(BuildPolicy::Skip),
            Some("overwrite") => Ok(BuildPolicy::Overwrite),
            _ => Self::invalid_value(CONFLICT_KEY, value),
        }
    }

    fn parse_platform(value: &Yaml) -> Result<PlatformPolicy, SettingsError> {
        match value.as_str() {
            Some("windows") => Ok(PlatformPolicy::Windows),
            Some("unix") => Ok(PlatformPolicy::UnixLike),
            _ => Self::invalid_value(PLATFORM_KEY, value),
        }
    }

    fn invalid_value<T>(key: &str, value: &Yaml) -> Result<T, SettingsError> {
        let value = value
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{value:?}"));
        InvalidValueSnafu { key, value }.fail()
    }

    fn lookup<'a, 'y>(
        top_level: &'a LinkedHashMap<Yaml<'y>, Yaml<'y>>,
        key: &str,
    ) -> Option<&'a Yaml<'y>> {
        top_level.get(&Yaml::Value(Scalar::String(Cow::Owned(key.to_string()))))
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| SettingsError::ParseError { source: e })?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };

        let top_level = document
            .as_mapping()
            .ok_or(SettingsError::TopLevelNotMap)?;

        for key in top_level.keys() {
            match key.as_str() {
                Some(CONFLICT_KEY) | Some(PLATFORM_KEY) => {}
                _ => debug!("Skipping unknown settings entry: {:?}", key),
            }
        }

        Ok(Settings {
            conflict: Self::lookup(top_level, CONFLICT_KEY)
                .map(Self::parse_conflict)
                .transpose()?,
            platform: Self::lookup(top_level, PLATFORM_KEY)
                .map(Self::parse_platform)
                .transpose()?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Unsupported value '{}' for setting '{}'", value, key))]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn settings_default_when_file_is_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = Settings::read(&temp_dir.path().join(SETTINGS_FILE_NAME));
        assert_eq!(result.expect("Missing file should not fail"), Settings::default());
    }

    #[test]
    fn settings_read_from_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "conflict: skip\nplatform: windows\n").expect("Failed to write settings");

        let settings = Settings::read(&path).expect("Failed to read settings");
        assert_eq!(settings.conflict, Some(BuildPolicy::Skip));
        assert_eq!(settings.platform, Some(PlatformPolicy::Windows));
    }

    #[test]
    fn settings_fail_when_path_is_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = Settings::read(temp_dir.path());
        assert!(matches!(result, Err(SettingsError::ReadError { .. })));
    }

    #[test]
    fn settings_handle_empty_content() {
        let result: Result<Settings, _> = "".try_into();
        assert_eq!(result.expect("Empty content should parse"), Settings::default());
    }

    #[test]
    fn settings_parse_every_conflict_value() {
        for (value, expected) in [
            ("error", BuildPolicy::FailOnExisting),
            ("skip", BuildPolicy::Skip),
            ("overwrite", BuildPolicy::Overwrite),
        ] {
            let contents = format!("conflict: {value}");
            let settings: Settings = contents.as_str().try_into().expect("Failed to parse");
            assert_eq!(settings.conflict, Some(expected));
            assert_eq!(settings.platform, None);
        }
    }

    #[test]
    fn settings_return_error_on_invalid_yaml() {
        let result: Result<Settings, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }

    #[test]
    fn settings_return_error_when_top_level_is_not_map() {
        let result: Result<Settings, _> = "- skip\n- overwrite".try_into();
        assert!(matches!(result, Err(SettingsError::TopLevelNotMap)));
    }

    #[test]
    fn settings_reject_unknown_values() {
        let result: Result<Settings, _> = "platform: beos".try_into();
        match result {
            Err(SettingsError::InvalidValue { key, value }) => {
                assert_eq!(key, "platform");
                assert_eq!(value, "beos");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn settings_reject_non_string_values() {
        let result: Result<Settings, _> = "conflict: [skip]".try_into();
        assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
    }

    #[test]
    fn settings_skip_unknown_keys() {
        let result: Result<Settings, _> = "colour: always\nplatform: unix".try_into();
        let settings = result.expect("Unknown keys should be skipped");
        assert_eq!(settings.platform, Some(PlatformPolicy::UnixLike));
    }
}
