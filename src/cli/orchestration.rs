//! Main release workflow orchestration logic
//!
//! Keeps the release steps apart from CLI argument parsing so the workflow
//! can be driven programmatically, for example against a
//! [MockRepository](crate::git::MockRepository).

use tracing::{debug, warn};

use crate::boundary::BoundaryWarning;
use crate::domain::{find_latest, PreReleaseStyle, Version};
use crate::error::{GitReleaseError, Result};
use crate::git::{short_tag_name, Repository};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
    pub pre: bool,

    /// Release exactly this version; bump flags are ignored
    pub explicit_version: Option<Version>,

    /// Only consider tags reachable from this branch
    pub branch: Option<String>,

    pub remote: String,

    /// Release despite uncommitted changes
    pub allow_dirty: bool,

    pub pre_release_style: PreReleaseStyle,
}

/// The version a release is going to publish
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Latest existing version, `None` for an explicit version
    pub current: Option<Version>,
    pub next: Version,
    /// Tag name for `next`
    pub tag: String,
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleasePlan {
    /// Tag name of the latest existing version
    pub fn current_tag(&self, style: PreReleaseStyle) -> Option<String> {
        self.current.map(|version| version.to_tag(style))
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was created and pushed
    pub tag: String,

    /// The remote the tag was pushed to
    pub remote: String,
}

/// Computes the version to release.
///
/// Collects the tags (all, or those reachable from `args.branch`), picks the
/// latest version and bumps it with the requested flags. An explicit version
/// skips the tag lookup entirely.
///
/// # Errors
/// * [GitReleaseError::EmptyTagSet] - No tags exist and no explicit version was given
/// * Any error from the repository while listing tags
pub fn plan_release<R: Repository + ?Sized>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
) -> Result<ReleasePlan> {
    if let Some(version) = args.explicit_version {
        debug!(%version, "using explicit version");
        return Ok(ReleasePlan {
            current: None,
            next: version,
            tag: version.to_tag(args.pre_release_style),
            warnings: Vec::new(),
        });
    }

    let tags = match &args.branch {
        Some(branch) => repo.list_tags_for_branch(branch)?,
        None => repo.list_tags()?,
    };
    debug!(count = tags.len(), "collected tags");

    let warnings = tags
        .iter()
        .filter(|tag| tag.parse::<Version>().is_err())
        .map(|tag| BoundaryWarning::UnparsableTag {
            tag: short_tag_name(tag).to_string(),
        })
        .collect();

    let current = find_latest(&tags)?;
    let mut next = current;
    next.increase(args.major, args.minor, args.patch, args.pre);
    debug!(%current, %next, "computed next version");

    Ok(ReleasePlan {
        current: Some(current),
        next,
        tag: next.to_tag(args.pre_release_style),
        warnings,
    })
}

/// Tags the repository with the planned version and pushes the tag.
///
/// Steps:
/// 1. Verify the repository is safe to release
/// 2. Refuse to reuse an existing tag
/// 3. Create the tag on HEAD
/// 4. Push it; on failure delete the tag again and return the push error
pub fn publish_release<R: Repository + ?Sized>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
    plan: &ReleasePlan,
) -> Result<WorkflowResult> {
    repo.is_safe_to_release(&args.remote, args.allow_dirty)?;

    if repo.exists_tag(&plan.tag)? {
        return Err(GitReleaseError::tag_creation(format!(
            "tag '{}' already exists",
            plan.tag
        )));
    }

    repo.create_tag(&plan.tag)?;

    if let Err(push_error) = repo.push_tag(&args.remote, &plan.tag) {
        warn!(tag = %plan.tag, "push failed, removing local tag");
        if let Err(delete_error) = repo.delete_tag(&plan.tag) {
            ui::display_boundary_warning(&BoundaryWarning::RollbackFailed {
                tag: plan.tag.clone(),
                reason: delete_error.to_string(),
            });
        }
        return Err(push_error);
    }

    Ok(WorkflowResult {
        tag: plan.tag.clone(),
        remote: args.remote.clone(),
    })
}

/// Runs [plan_release] followed by [publish_release] without user interaction.
pub fn run_release_workflow<R: Repository + ?Sized>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
) -> Result<WorkflowResult> {
    let plan = plan_release(repo, args)?;
    publish_release(repo, args, &plan)
}
