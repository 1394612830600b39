// tests/workflow_test.rs
use git_release::cli::{plan_release, publish_release, run_release_workflow, ReleaseWorkflowArgs};
use git_release::domain::PreReleaseStyle;
use git_release::git::{DryRunRepository, MockRepository, Repository};
use git_release::{GitReleaseError, Version};

fn args() -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs {
        remote: "origin".to_string(),
        ..Default::default()
    }
}

fn release(tags: &[&str], args: ReleaseWorkflowArgs) -> String {
    let repo = MockRepository::with_tags(tags.iter().copied());
    run_release_workflow(&repo, &args).unwrap().tag
}

#[test]
fn test_default_bump_is_patch() {
    assert_eq!(release(&["v0.0.1", "v0.0.2"], args()), "v0.0.3");
}

#[test]
fn test_minor_bump_after_release_candidates() {
    let tags = ["v0.1.0-RC.1", "v0.1.0-RC.2", "v0.1.0"];
    let result = release(
        &tags,
        ReleaseWorkflowArgs {
            minor: true,
            ..args()
        },
    );
    assert_eq!(result, "v0.2.0");
}

#[test]
fn test_continue_release_candidate_series() {
    let result = release(
        &["v1.0.0", "v1.1.0-RC.1"],
        ReleaseWorkflowArgs {
            pre: true,
            ..args()
        },
    );
    assert_eq!(result, "v1.1.0-RC.2");
}

#[test]
fn test_promote_release_candidate() {
    assert_eq!(release(&["v1.0.0", "v1.1.0-RC.3"], args()), "v1.1.0");
}

#[test]
fn test_major_release_candidate() {
    let result = release(
        &["v1.4.2"],
        ReleaseWorkflowArgs {
            major: true,
            pre: true,
            ..args()
        },
    );
    assert_eq!(result, "v2.0.0-RC.1");
}

#[test]
fn test_compact_style_tags() {
    let result = release(
        &["v1.0.0-RC1", "v1.0.0-RC2"],
        ReleaseWorkflowArgs {
            pre: true,
            pre_release_style: PreReleaseStyle::Compact,
            ..args()
        },
    );
    assert_eq!(result, "v1.0.0-RC3");
}

#[test]
fn test_release_tags_and_pushes() {
    let repo = MockRepository::with_tags(["v1.0.0"]);
    let result = run_release_workflow(&repo, &args()).unwrap();

    assert_eq!(result.tag, "v1.0.1");
    assert_eq!(result.remote, "origin");
    assert!(repo.has_tag("v1.0.1"));
    assert_eq!(repo.pushed_tags(), vec!["v1.0.1"]);
    assert_eq!(repo.pushed_remotes(), vec!["origin"]);
    assert_eq!(repo.safety_checks(), 1);
}

#[test]
fn test_push_failure_removes_tag() {
    let mut repo = MockRepository::with_tags(["v1.0.0"]);
    repo.fail_push("connection refused");

    let result = run_release_workflow(&repo, &args());

    assert!(matches!(result, Err(GitReleaseError::Push(_))));
    assert!(!repo.has_tag("v1.0.1"));
    assert!(repo.has_tag("v1.0.0"));
}

#[test]
fn test_failed_rollback_still_reports_push_error() {
    let mut repo = MockRepository::with_tags(["v1.0.0"]);
    repo.fail_push("connection refused");
    repo.fail_delete("locked");

    match run_release_workflow(&repo, &args()) {
        Err(GitReleaseError::Push(msg)) => assert!(msg.contains("connection refused")),
        other => panic!("expected Push error, got {:?}", other),
    }
    assert!(repo.has_tag("v1.0.1"));
}

#[test]
fn test_existing_tag_is_not_reused() {
    let repo = MockRepository::with_tags(["v1.0.0", "v1.1.0"]);
    let existing = ReleaseWorkflowArgs {
        explicit_version: Some(Version::new(1, 0, 0, 0)),
        ..args()
    };
    let plan = plan_release(&repo, &existing).unwrap();

    assert!(matches!(
        publish_release(&repo, &existing, &plan),
        Err(GitReleaseError::TagCreation(_))
    ));
    assert!(repo.pushed_tags().is_empty());
    assert!(repo.has_tag("v1.0.0"));
}

#[test]
fn test_dirty_repository_stops_before_tagging() {
    let mut repo = MockRepository::with_tags(["v1.0.0"]);
    repo.set_dirty(true);

    assert!(matches!(
        run_release_workflow(&repo, &args()),
        Err(GitReleaseError::UnsafeRepoState(_))
    ));
    assert!(!repo.has_tag("v1.0.1"));
}

#[test]
fn test_allow_dirty_releases_anyway() {
    let mut repo = MockRepository::with_tags(["v1.0.0"]);
    repo.set_dirty(true);

    let result = run_release_workflow(
        &repo,
        &ReleaseWorkflowArgs {
            allow_dirty: true,
            ..args()
        },
    )
    .unwrap();
    assert_eq!(result.tag, "v1.0.1");
}

#[test]
fn test_unsafe_state_is_not_bypassed_by_allow_dirty() {
    let mut repo = MockRepository::with_tags(["v1.0.0"]);
    repo.set_unsafe("branch is behind its upstream");

    let result = run_release_workflow(
        &repo,
        &ReleaseWorkflowArgs {
            allow_dirty: true,
            ..args()
        },
    );
    assert!(matches!(result, Err(GitReleaseError::UnsafeRepoState(_))));
    assert!(repo.pushed_tags().is_empty());
}

#[test]
fn test_branch_filter_limits_tags() {
    let mut repo = MockRepository::with_tags(["v3.0.0"]);
    repo.add_branch_tag("maintenance", "v1.2.0");
    repo.add_branch_tag("maintenance", "v1.2.1");

    let result = run_release_workflow(
        &repo,
        &ReleaseWorkflowArgs {
            branch: Some("maintenance".to_string()),
            ..args()
        },
    )
    .unwrap();
    assert_eq!(result.tag, "v1.2.2");
}

#[test]
fn test_unknown_branch_fails() {
    let repo = MockRepository::with_tags(["v1.0.0"]);
    let result = run_release_workflow(
        &repo,
        &ReleaseWorkflowArgs {
            branch: Some("missing".to_string()),
            ..args()
        },
    );
    assert!(matches!(result, Err(GitReleaseError::Branch(_))));
}

#[test]
fn test_no_tags_fails() {
    let repo = MockRepository::new();
    assert!(matches!(
        run_release_workflow(&repo, &args()),
        Err(GitReleaseError::EmptyTagSet)
    ));
}

#[test]
fn test_explicit_version_ignores_tags() {
    let repo = MockRepository::with_tags(["v9.9.9"]);
    let result = run_release_workflow(
        &repo,
        &ReleaseWorkflowArgs {
            explicit_version: Some("2.0.0-RC.1".parse().unwrap()),
            major: true,
            ..args()
        },
    )
    .unwrap();
    assert_eq!(result.tag, "v2.0.0-RC.1");
}

#[test]
fn test_dry_run_never_mutates() {
    let mut inner = MockRepository::with_tags(["v1.0.0"]);
    inner.set_dirty(true);
    let repo = DryRunRepository::new(inner);

    let result = run_release_workflow(&repo, &args()).unwrap();
    assert_eq!(result.tag, "v1.0.1");

    let inner = repo.into_inner();
    assert!(!inner.has_tag("v1.0.1"));
    assert!(inner.pushed_tags().is_empty());
    assert_eq!(inner.safety_checks(), 0);
    assert_eq!(inner.list_tags().unwrap(), vec!["refs/tags/v1.0.0"]);
}
