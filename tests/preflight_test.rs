//! Tests for PreflightService: build context and working tree checks

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::{FakeCommandRunner, FakeEnv};
use publish::application::services::{PreflightService, BUILD_CONTEXT_VAR};
use publish::application::ApplicationError;
use publish::domain::{Provenance, ResolvedSettings, VersionSource};
use publish::util::testing;

fn settings(ensure_make: bool, git_allow_uncommitted: bool) -> ResolvedSettings {
    ResolvedSettings {
        destination: "draft".into(),
        ensure_make,
        user_prompt: false,
        git_allow_uncommitted,
        overwrite: false,
        version: VersionSource::GitDescribe,
        files: Vec::new(),
        archive: None,
        provenance: Provenance::default(),
    }
}

fn service(cmd: FakeCommandRunner, env: FakeEnv) -> PreflightService {
    PreflightService::new(Arc::new(cmd), Arc::new(env))
}

#[rstest]
#[case::unset(FakeEnv::default())]
#[case::empty(FakeEnv::with(BUILD_CONTEXT_VAR, ""))]
fn given_ensure_make_outside_make_when_check_then_not_in_build_context(#[case] env: FakeEnv) {
    testing::init_test_setup();
    let cmd = Arc::new(FakeCommandRunner::clean_repo("v1"));
    let svc = PreflightService::new(cmd.clone(), Arc::new(env));

    let err = svc.check(&settings(true, false)).unwrap_err();

    assert!(matches!(err, ApplicationError::NotInBuildContext));
    assert!(cmd.calls().is_empty(), "git must not run after a failed build check");
}

#[test]
fn given_ensure_make_inside_make_when_check_then_passes() {
    let svc = service(
        FakeCommandRunner::clean_repo("v1"),
        FakeEnv::with(BUILD_CONTEXT_VAR, "1"),
    );

    let report = svc.check(&settings(true, false)).unwrap();

    assert_eq!(report.uncommitted, None);
}

#[test]
fn given_ensure_make_disabled_when_check_then_env_ignored() {
    let svc = service(FakeCommandRunner::clean_repo("v1"), FakeEnv::default());

    assert!(svc.check(&settings(false, false)).is_ok());
}

#[test]
fn given_dirty_tree_when_not_allowed_then_uncommitted_changes() {
    let cmd = FakeCommandRunner::new().respond("status", 0, " M src/paper.tex\n", "");
    let svc = service(cmd, FakeEnv::default());

    let err = svc.check(&settings(false, false)).unwrap_err();

    match err {
        ApplicationError::UncommittedChanges { status } => {
            assert!(status.contains("src/paper.tex"))
        }
        other => panic!("expected UncommittedChanges, got {other:?}"),
    }
}

#[test]
fn given_dirty_tree_when_allowed_then_reported() {
    let cmd = FakeCommandRunner::new().respond("status", 0, "?? notes.txt\n", "");
    let svc = service(cmd, FakeEnv::default());

    let report = svc.check(&settings(false, true)).unwrap();

    assert_eq!(report.uncommitted.as_deref(), Some("?? notes.txt\n"));
}

#[test]
fn given_git_status_fails_when_check_then_operation_failed() {
    let cmd = FakeCommandRunner::new().respond(
        "status",
        128,
        "",
        "fatal: not a git repository (or any of the parent directories): .git",
    );
    let svc = service(cmd, FakeEnv::default());

    let err = svc.check(&settings(false, false)).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("not a git repository"));
}
