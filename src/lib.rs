#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! MIME type allow-list validation for files on local disk.
//!
//! A [`MimeTypeValidator`] decides whether a file is acceptable (by default,
//! an image) by comparing its effective MIME type with an [`AllowList`].
//! The effective type comes from the caller-declared type, or from magic
//! bytes when header checking is enabled.
//!
//! ```no_run
//! use mimegate::{MimeTypeValidator, ValidationTarget};
//!
//! let mut validator = MimeTypeValidator::new();
//! validator.set_mime_type("image/gif, image/jpeg").enable_header_check();
//!
//! let target = ValidationTarget::new("/tmp/upload-1234")
//!     .with_name("photo.jpg")
//!     .with_declared_type("image/jpeg");
//! match validator.validate(&target) {
//!     Ok(detection) => println!("accepted as {}", detection.mime),
//!     Err(err) => println!("{}: {err}", err.code()),
//! }
//! ```

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

/// MIME type allow-list normalization and matching.
pub mod allow_list;
/// Fluent builder API.
pub mod builder;
/// Validator configuration.
pub mod config;
/// Detection results.
pub mod detection;
/// Error types exposed by this crate.
pub mod error;
/// Content-type detection backends.
pub mod sniffer;
/// Validation target model.
pub mod target;

pub use allow_list::{AllowList, MimeTypes, DEFAULT_IMAGE_TYPES};
pub use builder::MimeTypeValidatorBuilder;
pub use config::{ValidatorConfig, ValidatorInput, ValidatorOptions};
pub use detection::{Detection, DetectionSource};
pub use error::{ConfigError, FailureCode, Messages, ValidationError};
pub use sniffer::{guess_from_name, InferSniffer, NoopSniffer, Sniffer, HEADER_LEN};
pub use target::ValidationTarget;

/// Validates files against a MIME type allow-list.
#[derive(Debug, Clone)]
pub struct MimeTypeValidator<S = InferSniffer> {
    config: ValidatorConfig,
    sniffer: S,
}

impl MimeTypeValidator<InferSniffer> {
    /// Creates a validator accepting the built-in image types, header checking off.
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            sniffer: InferSniffer,
        }
    }

    /// Creates a validator from a string, a list, or an options mapping.
    pub fn from_input(input: impl Into<ValidatorInput>) -> Self {
        Self {
            config: ValidatorConfig::from_input(input),
            sniffer: InferSniffer,
        }
    }

    /// Creates a fluent builder with the default image list.
    pub fn builder() -> MimeTypeValidatorBuilder {
        MimeTypeValidatorBuilder::default()
    }
}

impl Default for MimeTypeValidator<InferSniffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MimeTypeValidator<S> {
    /// Creates a validator with explicit validated configuration.
    pub fn with_config(sniffer: S, config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, sniffer })
    }

    /// Replaces the content sniffer, keeping the configuration.
    pub fn with_sniffer<T: Sniffer>(self, sniffer: T) -> MimeTypeValidator<T> {
        MimeTypeValidator {
            config: self.config,
            sniffer,
        }
    }

    /// Returns an immutable reference to the active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns an immutable reference to the content sniffer.
    pub fn sniffer(&self) -> &S {
        &self.sniffer
    }

    /// Replaces the allow-list.
    pub fn set_mime_type(&mut self, value: impl Into<MimeTypes>) -> &mut Self {
        self.config.allow_list.set(value);
        self
    }

    /// Appends entries to the allow-list. Blank input leaves it unchanged.
    pub fn add_mime_type(&mut self, value: impl Into<MimeTypes>) -> &mut Self {
        self.config.allow_list.add(value);
        self
    }

    /// Returns the allow-list joined with commas.
    pub fn mime_type(&self) -> String {
        self.config.allow_list.joined()
    }

    /// Returns the allow-list entries in insertion order.
    pub fn mime_types(&self) -> &[String] {
        self.config.allow_list.entries()
    }

    /// Returns the allow-list.
    pub fn allow_list(&self) -> &AllowList {
        &self.config.allow_list
    }

    /// Makes file headers decide the effective MIME type.
    pub fn enable_header_check(&mut self) -> &mut Self {
        self.set_header_check(true)
    }

    /// Trusts the declared MIME type again.
    pub fn disable_header_check(&mut self) -> &mut Self {
        self.set_header_check(false)
    }

    /// Sets the header check flag.
    pub fn set_header_check(&mut self, enabled: bool) -> &mut Self {
        self.config.header_check = enabled;
        self
    }

    /// Returns `true` when header checking is enabled.
    pub fn header_check(&self) -> bool {
        self.config.header_check
    }
}

impl<S> MimeTypeValidator<S>
where
    S: Sniffer,
{
    /// Validates one file and returns its effective MIME type.
    ///
    /// Stops at the first failure: an unreadable file is reported before any
    /// detection runs, and an undetectable type before any comparison.
    pub fn validate(
        &self,
        target: impl Into<ValidationTarget>,
    ) -> Result<Detection, ValidationError> {
        let target = target.into();
        let file = target.display_name();

        let handle = open_readable(&target.path).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                path = %target.path.display(),
                error = %err,
                "validator: file is not readable"
            );
            not_readable(&file, &err)
        })?;

        let detection = self.detect(&target, &file, handle)?;

        if !self.config.allow_list.matches(&detection.mime) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                file = %file,
                mime = %detection.mime,
                source = %detection.source,
                allowed = %self.config.allow_list,
                "validator: MIME rejected by allow-list"
            );
            return Err(ValidationError::FalseType {
                file,
                detected: detection.mime,
                allowed: self.config.allow_list.joined(),
            });
        }

        Ok(detection)
    }

    /// Returns `true` when the file passes validation.
    pub fn is_valid(&self, target: impl Into<ValidationTarget>) -> bool {
        self.validate(target).is_ok()
    }

    /// Validates one file and returns its failure messages.
    ///
    /// The map is empty on success and holds exactly one entry on failure.
    pub fn messages(&self, target: impl Into<ValidationTarget>) -> Messages {
        match self.validate(target) {
            Ok(_) => Messages::new(),
            Err(err) => err.messages(),
        }
    }

    fn detect(
        &self,
        target: &ValidationTarget,
        file: &str,
        handle: File,
    ) -> Result<Detection, ValidationError> {
        if self.config.header_check {
            let header = read_header(handle).map_err(|err| not_readable(file, &err))?;
            return match (self.sniffer.sniff(&header), target.declared_type()) {
                (Some(mime), _) => Ok(Detection::new(mime, DetectionSource::Header)),
                // The declared type only fills in when the header yields nothing.
                (None, Some(declared)) => Ok(Detection::new(declared, DetectionSource::Declared)),
                (None, None) => Err(not_detected(file)),
            };
        }

        if let Some(declared) = target.declared_type() {
            return Ok(Detection::new(declared, DetectionSource::Declared));
        }

        let header = read_header(handle).map_err(|err| not_readable(file, &err))?;
        if let Some(mime) = self.sniffer.sniff(&header) {
            return Ok(Detection::new(mime, DetectionSource::Header));
        }

        match guess_from_name(file) {
            Some(mime) => Ok(Detection::new(mime, DetectionSource::Extension)),
            None => Err(not_detected(file)),
        }
    }
}

fn open_readable(path: &Path) -> io::Result<File> {
    let handle = File::open(path)?;
    if !handle.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    Ok(handle)
}

fn read_header(handle: File) -> io::Result<Vec<u8>> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    handle.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}

fn not_readable(file: &str, err: &io::Error) -> ValidationError {
    ValidationError::NotReadable {
        file: file.to_owned(),
        reason: err.to_string(),
    }
}

fn not_detected(file: &str) -> ValidationError {
    #[cfg(feature = "tracing")]
    tracing::debug!(file = file, "validator: MIME type could not be detected");
    ValidationError::NotDetected {
        file: file.to_owned(),
    }
}
