#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use mimegate::{
    guess_from_name, DetectionSource, FailureCode, InferSniffer, MimeTypeValidator, NoopSniffer,
    Sniffer, ValidationError, ValidationTarget,
};
use uuid::Uuid;

const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff\x00\x00\x00!\xf9\x04";
const PNG_HEADER: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

#[test]
fn infer_sniffer_detects_common_image_headers() {
    let sniffer = InferSniffer::new();

    assert_eq!(sniffer.sniff(GIF_HEADER).as_deref(), Some("image/gif"));
    assert_eq!(sniffer.sniff(PNG_HEADER).as_deref(), Some("image/png"));
    assert_eq!(sniffer.sniff(b"").as_deref(), None);
    assert_eq!(NoopSniffer.sniff(GIF_HEADER), None);
}

#[test]
fn extension_guess_uses_the_filename() {
    assert_eq!(guess_from_name("photo.png").as_deref(), Some("image/png"));
    assert_eq!(guess_from_name("scan.JPG").as_deref(), Some("image/jpeg"));
    assert_eq!(guess_from_name("upload"), None);
}

#[test]
fn header_is_sniffed_when_nothing_is_declared() {
    let root = temp_root();
    let path = write_fixture(&root, "phpA1b2C3", GIF_HEADER);

    let validator = MimeTypeValidator::new();
    let detection = validator.validate(&path).expect("gif header should be detected");

    assert_eq!(detection.mime, "image/gif");
    assert_eq!(detection.source, DetectionSource::Header);

    cleanup(root);
}

#[test]
fn blank_declared_type_is_treated_as_missing() {
    let root = temp_root();
    let path = write_fixture(&root, "phpA1b2C3", GIF_HEADER);

    let validator = MimeTypeValidator::new();
    let detection = validator
        .validate(ValidationTarget::new(&path).with_declared_type("   "))
        .expect("gif header should be detected");

    assert_eq!(detection.source, DetectionSource::Header);

    cleanup(root);
}

#[test]
fn extension_is_the_last_fallback() {
    let root = temp_root();
    let path = write_fixture(&root, "phpA1b2C3", b"no magic here");

    let validator = MimeTypeValidator::new().with_sniffer(NoopSniffer);
    let detection = validator
        .validate(ValidationTarget::new(&path).with_name("holiday.png"))
        .expect("extension should be guessed");

    assert_eq!(detection.mime, "image/png");
    assert_eq!(detection.source, DetectionSource::Extension);

    cleanup(root);
}

#[test]
fn extension_fallback_is_skipped_under_header_check() {
    let root = temp_root();
    let path = write_fixture(&root, "holiday.png", b"no magic here");

    let mut validator = MimeTypeValidator::new().with_sniffer(NoopSniffer);
    validator.enable_header_check();

    let err = validator.validate(&path).expect_err("header check must not guess");
    assert_eq!(err.code(), FailureCode::NotDetected);

    cleanup(root);
}

#[test]
fn no_source_at_all_is_not_detected() {
    let root = temp_root();
    let path = write_fixture(&root, "upload", b"no magic here");

    let validator = MimeTypeValidator::new().with_sniffer(NoopSniffer);
    let err = validator.validate(&path).expect_err("nothing to detect from");

    assert!(matches!(&err, ValidationError::NotDetected { file } if file == "upload"));
    let messages = err.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[&FailureCode::NotDetected].contains("could not be detected"));

    cleanup(root);
}

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("mimegate-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&root).expect("create temp root");
    root
}

fn write_fixture(root: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

fn cleanup(path: PathBuf) {
    let _ = std::fs::remove_dir_all(path);
}
