use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the node model and the presentation controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Option '{title}' is not attached to an options container")]
    ContainerNotAttached { title: String },

    #[error("Section {0} is out of range")]
    SectionOutOfRange(usize),

    #[error("Row {row} is out of range in section {section}")]
    RowOutOfRange { section: usize, row: usize },

    #[error("Row '{title}' does not accept a {expected} value")]
    ValueKindMismatch { title: String, expected: &'static str },

    #[error("Stack entry at depth {0} no longer resolves to a page")]
    StaleStackEntry(usize),
}

/// Result type for model and controller operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised by persistent storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse storage file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize storage values: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_not_attached_message_names_option() {
        let err = SettingsError::ContainerNotAttached {
            title: "Night".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Option 'Night' is not attached to an options container"
        );
    }

    #[test]
    fn test_row_out_of_range_message() {
        let err = SettingsError::RowOutOfRange { section: 1, row: 7 };
        assert_eq!(err.to_string(), "Row 7 is out of range in section 1");
    }
}
