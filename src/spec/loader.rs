//! OpenAPI document loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Pick the format from the file extension, if it names one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from content: JSON documents open with `{` or `[`.
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('{') | Some('[') => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl std::fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// The spec file could not be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum SpecLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {} as {format}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: SpecFormat,
        message: String,
    },
}

/// Read a spec file into a generic document tree.
pub fn load_document(path: &Path) -> Result<Value, SpecLoadError> {
    let content = fs::read_to_string(path).map_err(|source| SpecLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = SpecFormat::from_extension(path).unwrap_or_else(|| SpecFormat::sniff(&content));
    tracing::debug!(path = %path.display(), format = %format, "Parsing spec file");

    parse_document(&content, format).map_err(|message| SpecLoadError::Parse {
        path: path.to_path_buf(),
        format,
        message,
    })
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: SpecFormat) -> Result<Value, String> {
    match format {
        SpecFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        SpecFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}
