#![allow(missing_docs)]

use mimegate::{
    AllowList, ConfigError, MimeTypeValidator, MimeTypes, ValidatorConfig, ValidatorInput,
    ValidatorOptions, DEFAULT_IMAGE_TYPES,
};

#[test]
fn rejects_empty_allow_list() {
    let config = ValidatorConfig {
        allow_list: AllowList::new(""),
        ..ValidatorConfig::default()
    };

    let result = config.validate();
    assert!(matches!(result, Err(ConfigError::EmptyAllowList)));
}

#[test]
fn rejects_entries_with_inner_whitespace() {
    let config = ValidatorConfig {
        allow_list: AllowList::new("image/ png"),
        ..ValidatorConfig::default()
    };

    let result = config.validate();
    assert!(matches!(result, Err(ConfigError::InvalidMimeEntry { .. })));
}

#[test]
fn rejects_entries_with_empty_sides() {
    for entry in ["image/", "/png", "image/png/x"] {
        let config = ValidatorConfig {
            allow_list: AllowList::new(entry),
            ..ValidatorConfig::default()
        };

        let result = config.validate();
        assert!(
            matches!(result, Err(ConfigError::InvalidMimeEntry { .. })),
            "{entry} should be rejected"
        );
    }
}

#[test]
fn accepts_bare_tokens_and_full_types() {
    let config = ValidatorConfig {
        allow_list: AllowList::new("image, gif, image/svg+xml, application/vnd.hp-hpgl"),
        ..ValidatorConfig::default()
    };

    assert_eq!(config.validate(), Ok(()));
    assert_eq!(ValidatorConfig::default().validate(), Ok(()));
}

#[test]
fn string_input_sets_allow_list() {
    let validator = MimeTypeValidator::from_input("image/gif, image/jpeg");

    assert_eq!(validator.mime_types(), ["image/gif", "image/jpeg"]);
    assert!(!validator.header_check());
}

#[test]
fn list_input_sets_allow_list() {
    let validator = MimeTypeValidator::from_input(vec!["image/gif", "image/jpeg,image/png"]);

    assert_eq!(validator.mime_type(), "image/gif,image/jpeg,image/png");
}

#[test]
fn options_without_mime_entries_keep_default_list() {
    let validator = MimeTypeValidator::from_input(ValidatorOptions::new().with_header_check(true));

    assert!(validator.header_check());
    assert!(!validator.mime_types().is_empty());
    assert_eq!(validator.mime_types().len(), DEFAULT_IMAGE_TYPES.len());
}

#[test]
fn options_with_blank_mime_entries_keep_default_list() {
    let options = ValidatorOptions {
        mime_type: MimeTypes::Single(" ,".to_owned()),
        enable_header_check: false,
    };

    let config = ValidatorConfig::from_input(ValidatorInput::Options(options));
    assert_eq!(config.allow_list, AllowList::default());
}

#[test]
fn options_with_mime_entries_replace_default_list() {
    let config = ValidatorConfig::from_input(
        ValidatorOptions::new().with_mime_type(vec!["image/gif".to_owned(), "image/jpeg".to_owned()]),
    );

    assert_eq!(config.allow_list.entries(), ["image/gif", "image/jpeg"]);
    assert!(!config.header_check);
}

#[test]
fn options_merge_added_entries() {
    let options = ValidatorOptions::new()
        .add_mime_type("image/gif")
        .add_mime_type("")
        .add_mime_type(["image/jpeg, image/png"]);

    let config = ValidatorConfig::from_input(options);
    assert_eq!(config.allow_list.entries(), ["image/gif", "image/jpeg", "image/png"]);

    let kept = ValidatorOptions::new().add_mime_type(" , ");
    assert_eq!(kept.mime_type, MimeTypes::Default);
}
