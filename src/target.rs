use std::path::{Path, PathBuf};

/// File to validate, with the metadata an upload declared for it.
///
/// The declared type is only a hint; it is ignored while header checking is
/// enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationTarget {
    /// Location of the file on local disk.
    #[cfg_attr(feature = "serde", serde(rename = "tmp_name", alias = "path"))]
    pub path: PathBuf,
    /// Original filename supplied by the client.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Declared size in bytes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<u64>,
    /// Declared MIME type.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub declared_type: Option<String>,
    /// Upload error code. Informational only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub error: Option<i32>,
}

impl ValidationTarget {
    /// Creates a target for a bare path with no declared metadata.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            size: None,
            declared_type: None,
            error: None,
        }
    }

    /// Sets the original filename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the declared MIME type.
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Sets the upload error code.
    pub fn with_error(mut self, error: i32) -> Self {
        self.error = Some(error);
        self
    }

    /// Returns the declared MIME type when it is present and not blank.
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the basename used in messages.
    ///
    /// Prefers the declared filename, then the path's final component.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            return name.to_owned();
        }

        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ValidationTarget {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&PathBuf> for ValidationTarget {
    fn from(path: &PathBuf) -> Self {
        Self::new(path.clone())
    }
}

impl From<&Path> for ValidationTarget {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for ValidationTarget {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ValidationTarget {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&ValidationTarget> for ValidationTarget {
    fn from(target: &ValidationTarget) -> Self {
        target.clone()
    }
}
