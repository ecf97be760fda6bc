//! Content-type detection backends.

use std::path::Path;

/// Number of leading bytes handed to a [`Sniffer`].
pub const HEADER_LEN: usize = 8192;

/// Detects a MIME type from the leading bytes of a file.
///
/// Implementations are pure: the same header must yield the same answer.
pub trait Sniffer: Send + Sync + 'static {
    /// Returns the detected MIME type, or `None` when detection fails.
    fn sniff(&self, header: &[u8]) -> Option<String>;
}

/// Magic-byte sniffer backed by the `infer` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferSniffer;

impl InferSniffer {
    /// Creates a new magic-byte sniffer.
    pub fn new() -> Self {
        Self
    }
}

impl Sniffer for InferSniffer {
    fn sniff(&self, header: &[u8]) -> Option<String> {
        infer::get(header).map(|kind| kind.mime_type().to_owned())
    }
}

/// Sniffer that never detects anything.
///
/// Use it when header inspection is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSniffer;

impl Sniffer for NoopSniffer {
    fn sniff(&self, _header: &[u8]) -> Option<String> {
        None
    }
}

impl<F> Sniffer for F
where
    F: Fn(&[u8]) -> Option<String> + Send + Sync + 'static,
{
    fn sniff(&self, header: &[u8]) -> Option<String> {
        self(header)
    }
}

/// Guesses a MIME type from a filename's extension.
pub fn guess_from_name(name: &str) -> Option<String> {
    mime_guess::from_path(Path::new(name))
        .first()
        .map(|mime| mime.essence_str().to_owned())
}
