use crate::{
    allow_list::{AllowList, MimeTypes},
    error::ConfigError,
};

/// Options mapping accepted at construction time.
///
/// With the `serde` feature this deserializes from a map such as
/// `{"mimeType": ["image/gif", "image/jpeg"], "enableHeaderCheck": true}`.
/// List-style entries (`{"0": "image/gif", "1": "image/jpeg"}`) and string
/// arrays under other keys are merged into the allow-list. Any other key is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", from = "raw::RawOptions")
)]
pub struct ValidatorOptions {
    /// Allow-list entries. Falls back to the built-in image list when empty.
    pub mime_type: MimeTypes,
    /// Whether file headers decide the effective MIME type.
    pub enable_header_check: bool,
}

impl ValidatorOptions {
    /// Creates options with the default image list and header checking off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allow-list entries.
    pub fn with_mime_type(mut self, value: impl Into<MimeTypes>) -> Self {
        self.mime_type = value.into();
        self
    }

    /// Merges entries into the allow-list.
    ///
    /// Merging into the default list replaces it; blank input changes nothing.
    pub fn add_mime_type(mut self, value: impl Into<MimeTypes>) -> Self {
        let added = value.into().normalize();
        if added.is_empty() {
            return self;
        }

        let mut merged = match &self.mime_type {
            MimeTypes::Default => Vec::new(),
            current => current.normalize(),
        };
        merged.extend(added);
        self.mime_type = MimeTypes::Many(merged);
        self
    }

    /// Sets the header check flag.
    pub fn with_header_check(mut self, enabled: bool) -> Self {
        self.enable_header_check = enabled;
        self
    }
}

#[cfg(feature = "serde")]
mod raw {
    use std::collections::BTreeMap;

    use serde::{de::IgnoredAny, Deserialize};

    use super::ValidatorOptions;
    use crate::allow_list::MimeTypes;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct RawOptions {
        #[serde(default)]
        mime_type: MimeTypes,
        #[serde(default)]
        enable_header_check: bool,
        #[serde(flatten)]
        extra: BTreeMap<String, RawValue>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        List(Vec<String>),
        Other(IgnoredAny),
    }

    impl From<RawOptions> for ValidatorOptions {
        fn from(raw: RawOptions) -> Self {
            let mut extra: Vec<(String, RawValue)> = raw.extra.into_iter().collect();
            // Numeric keys keep list order; "10" must follow "9".
            extra.sort_by(|(a, _), (b, _)| {
                let rank = |key: &str| key.parse::<u64>().unwrap_or(u64::MAX);
                rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
            });

            let mut options = ValidatorOptions {
                mime_type: raw.mime_type,
                enable_header_check: raw.enable_header_check,
            };
            for (key, value) in extra {
                options = match value {
                    RawValue::Text(text) if key.parse::<u64>().is_ok() => {
                        options.add_mime_type(text)
                    }
                    RawValue::List(list) => options.add_mime_type(list),
                    RawValue::Text(_) | RawValue::Other(_) => options,
                };
            }
            options
        }
    }
}

/// Construction input for a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ValidatorInput {
    /// One comma-separated string of MIME types.
    Single(String),
    /// A list of MIME types, each possibly comma-separated.
    Many(Vec<String>),
    /// A full options mapping.
    Options(ValidatorOptions),
}

impl From<&str> for ValidatorInput {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for ValidatorInput {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ValidatorInput {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ValidatorInput {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(ToOwned::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ValidatorInput {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl From<ValidatorOptions> for ValidatorInput {
    fn from(options: ValidatorOptions) -> Self {
        Self::Options(options)
    }
}

/// Validator configuration model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidatorConfig {
    /// Accepted MIME types.
    pub allow_list: AllowList,
    /// Whether file headers decide the effective MIME type.
    pub header_check: bool,
}

impl ValidatorConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from any construction input.
    ///
    /// An options mapping without MIME entries keeps the built-in image list.
    pub fn from_input(input: impl Into<ValidatorInput>) -> Self {
        match input.into() {
            ValidatorInput::Single(value) => Self {
                allow_list: AllowList::new(value),
                header_check: false,
            },
            ValidatorInput::Many(values) => Self {
                allow_list: AllowList::new(values),
                header_check: false,
            },
            ValidatorInput::Options(options) => {
                let mut allow_list = AllowList::new(options.mime_type);
                if allow_list.is_empty() {
                    allow_list = AllowList::default();
                }
                Self {
                    allow_list,
                    header_check: options.enable_header_check,
                }
            }
        }
    }

    /// Validates the configuration.
    ///
    /// Entries must be a bare token or `type/subtype`, without inner
    /// whitespace, and the list must not be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_list.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }

        for entry in self.allow_list.entries() {
            if !is_valid_entry(entry) {
                return Err(ConfigError::InvalidMimeEntry {
                    entry: entry.clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_valid_entry(entry: &str) -> bool {
    if entry.is_empty() || entry.chars().any(char::is_whitespace) {
        return false;
    }

    match entry.split_once('/') {
        Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/'),
        None => true,
    }
}
