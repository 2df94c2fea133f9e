use snafu::{Snafu, ensure};

use crate::tree::EntryKind;
use crate::validator::PlatformPolicy;

/// Longest accepted name, in bytes. Filesystems limit names by their encoded
/// length, so multibyte characters count more than once.
pub const MAX_NAME_LENGTH: usize = 250;

/// Reason a single directory or file name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum InvalidName {
    #[snafu(display("Name must not be empty"))]
    Empty,
    #[snafu(display("'{name}' is a reserved name"))]
    Reserved { name: String },
    #[snafu(display("Maximum length of a name is {max} bytes"))]
    TooLong { max: usize },
    #[snafu(display(
        "Illegal characters are not allowed: '{}'",
        illegal.iter().collect::<String>()
    ))]
    IllegalCharacters { illegal: &'static [char] },
    #[snafu(display("Leading or trailing spaces are not allowed"))]
    EdgeSpaces,
    #[snafu(display("Invalid extension: '{extension}'"))]
    InvalidExtension { extension: String },
}

pub(crate) fn check_name(
    name: &str,
    kind: EntryKind,
    policy: PlatformPolicy,
) -> Result<(), InvalidName> {
    ensure!(!name.is_empty(), EmptySnafu);
    ensure!(name != "." && name != "..", ReservedSnafu { name });
    ensure!(
        name.len() <= MAX_NAME_LENGTH,
        TooLongSnafu {
            max: MAX_NAME_LENGTH
        }
    );

    let illegal = policy.illegal_chars();
    ensure!(!name.contains(illegal), IllegalCharactersSnafu { illegal });
    ensure!(
        !policy.forbids_edge_spaces() || (!name.starts_with(' ') && !name.ends_with(' ')),
        EdgeSpacesSnafu
    );

    if kind == EntryKind::File {
        // The root always keeps at least one non-dot character, so only the
        // extension needs checking here.
        let (_root, extension) = split_extension(name);
        ensure!(
            extension.is_empty() || is_valid_extension(extension, policy),
            InvalidExtensionSnafu { extension }
        );
    }

    Ok(())
}

/// Splits a file name at its last `.` into root and extension.
///
/// Leading dots belong to the root (`.gitignore` has no extension) and a
/// trailing dot yields no extension (`notes.` stays whole).
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name.rfind('.') {
        Some(dot) if dot > stem_start && dot + 1 < name.len() => name.split_at(dot),
        _ => (name, ""),
    }
}

/// An extension is a single leading `.` followed by at least one character,
/// none of which is a dot, whitespace, or illegal for the policy.
pub(crate) fn is_valid_extension(extension: &str, policy: PlatformPolicy) -> bool {
    let Some(rest) = extension.strip_prefix('.') else {
        return false;
    };

    !rest.is_empty()
        && !rest.contains('.')
        && !rest.contains(char::is_whitespace)
        && !rest.contains(policy.illegal_chars())
}
