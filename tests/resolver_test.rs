//! Integration tests for layered settings resolution.
//!
//! Precedence (lowest to highest): default < file < destination < environment < args

use std::path::Path;

use rstest::rstest;

use publish::config::{parse_settings, ARGS_LAYER, ENV_LAYER};
use publish::domain::{
    resolve, CommonSettings, DomainError, PublishSettings, SettingKey, SettingsLayer,
    VersionSource,
};

const ORIGIN: &str = "publish_settings.toml";

const SETTINGS: &str = r#"
ensure_make = true
user_prompt = true
overwrite = false

[destinations.draft]
[[destinations.draft.files]]
source = "build/paper.pdf"
target = "out/{destination}/paper_{version}.pdf"

[destinations.release]
overwrite = true
version = "user_supplied"
[[destinations.release.files]]
source = "build/paper.pdf"
target = "out/{destination}/paper_{version}.pdf"
[[destinations.release.files]]
source = "build/supplement.pdf"
target = "out/{destination}/supplement_{version}.pdf"

[destinations.local]
ensure_make = false
user_prompt = false
git_allow_uncommitted = true
[[destinations.local.files]]
source = "build/paper.pdf"
target = "/tmp/paper.pdf"
"#;

fn settings() -> PublishSettings {
    parse_settings(SETTINGS, Path::new(ORIGIN)).expect("valid settings")
}

/// Reference merge: destination keys over global keys over defaults.
fn expected_merge(file: &PublishSettings, destination: &str) -> CommonSettings {
    let mut merged = CommonSettings::defaults();
    merged.overlay(&file.globals());
    merged.overlay(&file.destinations[destination].overrides());
    merged
}

#[rstest]
#[case("draft")]
#[case("release")]
#[case("local")]
fn given_no_overrides_when_resolve_then_destination_merged_over_global(#[case] name: &str) {
    let file = settings();

    let resolved = resolve(&file, ORIGIN, name, &[]).unwrap();

    let expected = expected_merge(&file, name);
    assert_eq!(Some(resolved.ensure_make), expected.ensure_make);
    assert_eq!(Some(resolved.user_prompt), expected.user_prompt);
    assert_eq!(Some(resolved.git_allow_uncommitted), expected.git_allow_uncommitted);
    assert_eq!(Some(resolved.overwrite), expected.overwrite);
    assert_eq!(Some(resolved.version), expected.version);
    assert_eq!(resolved.files, file.destinations[name].files);
    assert_eq!(resolved.destination, name);
}

#[test]
fn given_release_when_resolve_then_provenance_names_each_layer() {
    let resolved = resolve(&settings(), ORIGIN, "release", &[]).unwrap();

    assert!(resolved.overwrite);
    assert_eq!(resolved.version, VersionSource::UserSupplied);
    assert_eq!(
        resolved.set_by(SettingKey::Overwrite),
        Some("publish_settings.toml:destinations.release")
    );
    assert_eq!(
        resolved.set_by(SettingKey::EnsureMake),
        Some("publish_settings.toml")
    );
    assert_eq!(resolved.set_by(SettingKey::GitAllowUncommitted), Some("default"));
}

#[test]
fn given_unknown_destination_when_resolve_then_lists_valid_names() {
    let err = resolve(&settings(), ORIGIN, "staging", &[]).unwrap_err();

    assert_eq!(
        err,
        DomainError::UnknownDestination {
            name: "staging".into(),
            valid: vec!["draft".into(), "local".into(), "release".into()],
        }
    );
    let message = err.to_string();
    for name in ["draft", "local", "release"] {
        assert!(message.contains(name), "{name} missing from: {message}");
    }
}

#[test]
fn given_env_and_args_when_resolve_then_args_win() {
    let env = SettingsLayer::new(
        ENV_LAYER,
        CommonSettings {
            overwrite: Some(true),
            user_prompt: Some(false),
            ..Default::default()
        },
    );
    let args = SettingsLayer::new(
        ARGS_LAYER,
        CommonSettings {
            overwrite: Some(false),
            ..Default::default()
        },
    );

    let resolved = resolve(&settings(), ORIGIN, "release", &[env, args]).unwrap();

    assert!(!resolved.overwrite);
    assert!(!resolved.user_prompt);
    assert_eq!(resolved.set_by(SettingKey::Overwrite), Some(ARGS_LAYER));
    assert_eq!(resolved.set_by(SettingKey::UserPrompt), Some(ENV_LAYER));
    // untouched by overrides, still from the destination
    assert_eq!(resolved.version, VersionSource::UserSupplied);
}

#[test]
fn given_empty_override_layers_when_resolve_then_same_as_none() {
    let empty = [
        SettingsLayer::new(ENV_LAYER, CommonSettings::default()),
        SettingsLayer::new(ARGS_LAYER, CommonSettings::default()),
    ];

    let with_empty = resolve(&settings(), ORIGIN, "local", &empty).unwrap();
    let without = resolve(&settings(), ORIGIN, "local", &[]).unwrap();

    assert_eq!(with_empty, without);
}

#[test]
fn given_archive_in_file_when_resolve_then_carried_through() {
    let content = format!(
        "{SETTINGS}\n[archive]\nbranch = \"main\"\nformat = \"zip\"\nprefix = \"p/\"\ntarget = \"a.zip\"\n"
    );
    let file = parse_settings(&content, Path::new(ORIGIN)).unwrap();

    let resolved = resolve(&file, ORIGIN, "draft", &[]).unwrap();

    assert_eq!(resolved.archive.unwrap().format, "zip");
}
