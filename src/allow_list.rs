//! MIME type allow-list normalization and matching.

use std::fmt;

/// Image MIME types accepted when no explicit allow-list is configured.
pub const DEFAULT_IMAGE_TYPES: &[&str] = &[
    "application/cdf",
    "application/dicom",
    "application/fractals",
    "application/postscript",
    "application/vnd.hp-hpgl",
    "application/vnd.oasis.opendocument.graphics",
    "application/x-cdf",
    "application/x-cmu-raster",
    "application/x-ima",
    "application/x-inventor",
    "application/x-koan",
    "application/x-portable-anymap",
    "application/x-world-x",
    "image/avif",
    "image/bmp",
    "image/c",
    "image/cgm",
    "image/fif",
    "image/gif",
    "image/heic",
    "image/heif",
    "image/jpeg",
    "image/jpm",
    "image/jpx",
    "image/jp2",
    "image/jxl",
    "image/naplps",
    "image/pjpeg",
    "image/png",
    "image/svg",
    "image/svg+xml",
    "image/tiff",
    "image/vnd.adobe.photoshop",
    "image/vnd.djvu",
    "image/vnd.fpx",
    "image/vnd.microsoft.icon",
    "image/vnd.net-fpx",
    "image/webp",
    "image/x-canon-cr2",
    "image/x-cmu-raster",
    "image/x-cmx",
    "image/x-coreldraw",
    "image/x-cpi",
    "image/x-emf",
    "image/x-ico",
    "image/x-icon",
    "image/x-jg",
    "image/x-ms-bmp",
    "image/x-niff",
    "image/x-pict",
    "image/x-pcx",
    "image/x-png",
    "image/x-portable-anymap",
    "image/x-portable-bitmap",
    "image/x-portable-greymap",
    "image/x-portable-pixelmap",
    "image/x-quicktime",
    "image/x-rgb",
    "image/x-tiff",
    "image/x-unknown",
    "image/x-windows-bmp",
    "image/x-xpmi",
];

/// Input accepted wherever an allow-list is configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MimeTypes {
    /// Use the built-in image type list.
    #[default]
    Default,
    /// One string, split on commas.
    Single(String),
    /// Several strings, each split on commas.
    Many(Vec<String>),
}

impl MimeTypes {
    /// Returns the normalized entries for this input.
    ///
    /// Every piece is trimmed and empty pieces are dropped.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::Default => DEFAULT_IMAGE_TYPES.iter().map(|s| (*s).to_owned()).collect(),
            Self::Single(value) => split_entries(value).collect(),
            Self::Many(values) => values.iter().flat_map(|v| split_entries(v)).collect(),
        }
    }
}

fn split_entries(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
}

impl From<&str> for MimeTypes {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for MimeTypes {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for MimeTypes {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Vec<String>> for MimeTypes {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for MimeTypes {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(ToOwned::to_owned).collect())
    }
}

impl From<&[&str]> for MimeTypes {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MimeTypes {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl<T: Into<MimeTypes>> From<Option<T>> for MimeTypes {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Default, Into::into)
    }
}

/// Ordered list of accepted MIME types or bare type tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list from any supported input shape.
    pub fn new(value: impl Into<MimeTypes>) -> Self {
        Self {
            entries: value.into().normalize(),
        }
    }

    /// Creates an allow-list with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replaces all entries.
    pub fn set(&mut self, value: impl Into<MimeTypes>) {
        self.entries = value.into().normalize();
    }

    /// Appends entries after the existing ones.
    pub fn add(&mut self, value: impl Into<MimeTypes>) {
        self.entries.extend(value.into().normalize());
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries joined with commas.
    pub fn joined(&self) -> String {
        self.entries.join(",")
    }

    /// Returns `true` when any entry matches `mime`.
    pub fn matches(&self, mime: &str) -> bool {
        self.entries.iter().any(|entry| entry_matches(entry, mime))
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(MimeTypes::Default)
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Matches one allow-list entry against an effective MIME type.
///
/// An entry with a `/` must equal the type's essence. A bare entry matches
/// the major type or the subtype. Parameters after `;` are ignored and the
/// comparison is case-insensitive.
pub fn entry_matches(entry: &str, mime: &str) -> bool {
    let essence = essence_of(mime);

    if entry.contains('/') {
        return entry.eq_ignore_ascii_case(&essence);
    }

    match essence.split_once('/') {
        Some((major, subtype)) => {
            entry.eq_ignore_ascii_case(major) || entry.eq_ignore_ascii_case(subtype)
        }
        None => entry.eq_ignore_ascii_case(&essence),
    }
}

fn essence_of(mime: &str) -> String {
    // Declared types are free-form; fall back to a plain split when they do not parse.
    match mime.trim().parse::<mime::Mime>() {
        Ok(parsed) => parsed.essence_str().to_owned(),
        Err(_) => mime.split(';').next().unwrap_or(mime).trim().to_owned(),
    }
}
