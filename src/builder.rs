use crate::{
    allow_list::MimeTypes,
    config::ValidatorConfig,
    error::ConfigError,
    sniffer::{InferSniffer, Sniffer},
    MimeTypeValidator,
};

/// Builder for configuring a [`MimeTypeValidator`].
#[derive(Debug, Clone, Default)]
pub struct MimeTypeValidatorBuilder<S = InferSniffer> {
    config: ValidatorConfig,
    sniffer: S,
}

impl MimeTypeValidatorBuilder<InferSniffer> {
    /// Creates a builder with the default image list and header checking off.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> MimeTypeValidatorBuilder<S> {
    /// Returns the current builder configuration snapshot.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Replaces the full builder configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the allow-list.
    pub fn mime_type(mut self, value: impl Into<MimeTypes>) -> Self {
        self.config.allow_list.set(value);
        self
    }

    /// Appends entries to the allow-list.
    pub fn add_mime_type(mut self, value: impl Into<MimeTypes>) -> Self {
        self.config.allow_list.add(value);
        self
    }

    /// Sets whether file headers decide the effective MIME type.
    pub fn header_check(mut self, enabled: bool) -> Self {
        self.config.header_check = enabled;
        self
    }

    /// Enables header checking.
    pub fn enable_header_check(self) -> Self {
        self.header_check(true)
    }

    /// Sets the content sniffer.
    pub fn sniffer<T: Sniffer>(self, sniffer: T) -> MimeTypeValidatorBuilder<T> {
        MimeTypeValidatorBuilder {
            config: self.config,
            sniffer,
        }
    }

    /// Validates builder configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    /// Finalizes and returns validated configuration.
    pub fn build_config(self) -> Result<ValidatorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Builds a validator from validated configuration.
    pub fn build(self) -> Result<MimeTypeValidator<S>, ConfigError>
    where
        S: Sniffer,
    {
        MimeTypeValidator::with_config(self.sniffer, self.config)
    }
}
