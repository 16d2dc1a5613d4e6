//! Error types surfaced while loading the location registry.
use std::{fmt, path::PathBuf};

/// Configuration failures detected when the registry is loaded at startup.
#[derive(Debug)]
pub enum RegistryError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        message: String,
    },
    Empty {
        path: PathBuf,
    },
}

impl RegistryError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::Empty { path: path.into() }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Failed to read location registry {:?}: {}", path, source)
            }
            Self::Parse { path, message } => {
                write!(f, "Failed to parse location registry {:?}: {}", path, message)
            }
            Self::Empty { path } => write!(f, "Location registry {:?} has no locations", path),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_registry_path() {
        let missing = RegistryError::read(
            "assets/tour/missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(missing.to_string().contains("missing.toml"));
        assert!(std::error::Error::source(&missing).is_some());

        let empty = RegistryError::empty("assets/tour/locations.toml");
        assert!(empty.to_string().contains("no locations"));
        assert!(std::error::Error::source(&empty).is_none());

        let parse = RegistryError::parse("x.toml", "expected `=`");
        assert!(matches!(parse, RegistryError::Parse { .. }));
        assert!(parse.to_string().contains("expected `=`"));
    }
}
