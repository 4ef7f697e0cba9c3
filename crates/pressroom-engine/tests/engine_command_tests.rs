//! Engine command dispatch

mod common;

use common::{cta, hero, page, v, Race, SpyBackend};
use pressroom_core::errors::{ExErrorKind, ValidationIssue};
use pressroom_core::model::{Section, SectionType};
use pressroom_core::policy::{AllowAllGate, DenyAllGate};
use pressroom_core::semver::BumpClass;
use pressroom_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use pressroom_engine::commands::publish::PublishOptions;
use pressroom_store::backend::FsBackend;
use pressroom_store::SnapshotStore;
use std::time::Duration;
use tempfile::TempDir;

fn setup_store() -> (TempDir, SnapshotStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(FsBackend::new(temp_dir.path()), Duration::from_secs(10));
    (temp_dir, store)
}

fn publish_cmd(store: &SnapshotStore, doc: pressroom_core::model::Document) {
    let result = apply_engine_command(
        EngineCommand::Publish {
            slug: doc.slug.clone(),
            document: doc,
            options: PublishOptions::default(),
        },
        store,
        &AllowAllGate,
    )
    .unwrap();
    let EngineCommandResult::Published(_) = result else {
        panic!("Expected Published")
    };
}

#[test]
fn test_read_commands_after_publish() {
    // Given: two published versions
    let (_tmp, store) = setup_store();
    publish_cmd(&store, page("home", vec![hero("h", "Hello")]));
    publish_cmd(&store, page("home", vec![hero("h", "Hello!")]));

    // When / Then: latest
    let EngineCommandResult::Snapshot(latest) = apply_engine_command(
        EngineCommand::Latest {
            slug: "home".to_string(),
        },
        &store,
        &DenyAllGate,
    )
    .unwrap() else {
        panic!("Expected Snapshot")
    };
    assert_eq!(latest.version, v("0.1.1"));

    // show
    let EngineCommandResult::Snapshot(first) = apply_engine_command(
        EngineCommand::Show {
            slug: "home".to_string(),
            version: v("0.1.0"),
        },
        &store,
        &DenyAllGate,
    )
    .unwrap() else {
        panic!("Expected Snapshot")
    };
    assert_eq!(first.changelog, "- Added hero section");

    // history
    let EngineCommandResult::History(history) = apply_engine_command(
        EngineCommand::History {
            slug: "home".to_string(),
        },
        &store,
        &DenyAllGate,
    )
    .unwrap() else {
        panic!("Expected History")
    };
    assert_eq!(history.versions, vec![v("0.1.0"), v("0.1.1")]);
}

#[test]
fn test_diff_preview_does_not_write() {
    let (_tmp, store) = setup_store();
    publish_cmd(&store, page("home", vec![hero("h", "Hello")]));

    let EngineCommandResult::Diff(preview) = apply_engine_command(
        EngineCommand::Diff {
            slug: "home".to_string(),
            document: page("home", vec![hero("h", "Hello"), cta("c", "Join")]),
        },
        &store,
        &DenyAllGate,
    )
    .unwrap() else {
        panic!("Expected Diff")
    };

    assert_eq!(preview.base_version, v("0.1.0"));
    assert_eq!(preview.next_version, v("0.2.0"));
    assert_eq!(preview.bump, BumpClass::Minor);
    assert_eq!(preview.diff.changes().len(), 1);
    assert_eq!(store.history("home").unwrap(), vec![v("0.1.0")]);
}

#[test]
fn test_read_errors_propagate_unchanged() {
    let (_tmp, store) = setup_store();

    let err = apply_engine_command(
        EngineCommand::Latest {
            slug: "nothing-here".to_string(),
        },
        &store,
        &AllowAllGate,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_publish_command_checks_gate() {
    let (_tmp, store) = setup_store();

    let err = apply_engine_command(
        EngineCommand::Publish {
            slug: "home".to_string(),
            document: page("home", vec![hero("h", "Hello")]),
            options: PublishOptions::default(),
        },
        &store,
        &DenyAllGate,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::PublishDenied);
}

#[test]
fn test_diff_preview_rejects_invalid_draft_before_store_access() {
    // Given: a draft with a foreign slug, two blank section ids and a placeholder link
    let temp_dir = TempDir::new().unwrap();
    let (spy, counters) = SpyBackend::new(FsBackend::new(temp_dir.path()), Race::Off);
    let store = SnapshotStore::new(spy, Duration::from_secs(10));
    let draft = page(
        "OTHER SLUG",
        vec![
            Section::with_defaults("", SectionType::Cta),
            Section::with_defaults("", SectionType::Cta),
        ],
    );

    // When: previewing it against "home"
    let err = apply_engine_command(
        EngineCommand::Diff {
            slug: "home".to_string(),
            document: draft,
        },
        &store,
        &DenyAllGate,
    )
    .unwrap_err();

    // Then: the validation gate answers and the store is never read
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(err.code(), "ERR_VALIDATION");
    assert!(err
        .issues()
        .iter()
        .any(|issue| matches!(issue, ValidationIssue::SlugMismatch { .. })));
    assert!(err
        .issues()
        .iter()
        .any(|issue| matches!(issue, ValidationIssue::InvalidUrl { .. })));
    assert!(err
        .issues()
        .iter()
        .any(|issue| matches!(issue, ValidationIssue::EmptySectionId { .. })));
    assert_eq!(counters.io_calls(), 0);
}
