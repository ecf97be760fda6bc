use std::fmt;

/// Where the effective MIME type of a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionSource {
    /// The caller-declared type.
    Declared,
    /// Magic bytes in the file header.
    Header,
    /// The filename extension.
    Extension,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Declared => "declared",
            Self::Header => "header",
            Self::Extension => "extension",
        })
    }
}

/// Effective MIME type of an accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// MIME type compared against the allow-list.
    pub mime: String,
    /// How the MIME type was established.
    pub source: DetectionSource,
}

impl Detection {
    pub(crate) fn new(mime: impl Into<String>, source: DetectionSource) -> Self {
        Self {
            mime: mime.into(),
            source,
        }
    }

    /// Parses the effective type, when it is a well-formed MIME type.
    pub fn parsed(&self) -> Option<mime::Mime> {
        self.mime.parse().ok()
    }
}
