//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations a
//! release needs, allowing for multiple implementations including a real
//! repository, a dry-run wrapper and a mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [dry_run::DryRunRepository]: Delegates reads, turns every write into a no-op
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! let latest = git_release::domain::find_latest(repo.list_tags()?)?;
//! println!("Latest version: {}", latest);
//! # Ok(())
//! # }
//! ```

pub mod dry_run;
pub mod mock;
pub mod repository;

pub use dry_run::DryRunRepository;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Git operations needed to publish a release tag
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map the
/// underlying failures to the [crate::error::GitReleaseError] variant named
/// on each method.
pub trait Repository {
    /// Get all tags in the repository
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Full reference names, e.g. `refs/tags/v1.2.3`
    /// * `Err` - If there's a Git error
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get the tags whose commit is reachable from a branch head
    ///
    /// # Arguments
    /// * `branch_name` - Local branch name, or a remote-tracking one such as `origin/main`
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Full reference names of the reachable tags
    /// * `Err(GitReleaseError::Branch)` - If the branch doesn't exist
    ///
    /// # Example
    /// ```rust
    /// # use git_release::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
    /// for tag in repo.list_tags_for_branch("main")? {
    ///     println!("{}", tag);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags_for_branch(&self, branch_name: &str) -> Result<Vec<String>>;

    /// Get the full hash of the commit HEAD points to
    fn latest_commit_hash(&self) -> Result<String>;

    /// Check whether a tag exists
    ///
    /// # Arguments
    /// * `name` - Tag name without the `refs/tags/` prefix
    fn exists_tag(&self, name: &str) -> Result<bool>;

    /// Verify the working copy can be released as is
    ///
    /// Rejects uncommitted changes unless `allow_dirty` is set, then fetches
    /// `remote` and rejects commits that have not been pushed or a branch
    /// that is behind its upstream. A detached HEAD or a branch without an
    /// upstream cannot be verified and is rejected as well.
    ///
    /// # Returns
    /// * `Ok(())` - Safe to tag and push
    /// * `Err(GitReleaseError::UnsafeRepoState)` - Describes the first failing condition
    fn is_safe_to_release(&self, remote: &str, allow_dirty: bool) -> Result<()>;

    /// Create a lightweight tag on the HEAD commit
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(GitReleaseError::TagCreation)` - If the tag exists or cannot be written
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Delete a local tag
    ///
    /// Deleting a tag that doesn't exist succeeds.
    ///
    /// # Returns
    /// * `Ok(())` - The tag no longer exists
    /// * `Err(GitReleaseError::TagDeletion)` - If the tag could not be removed
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(GitReleaseError::Push)` - If the remote is missing or rejects the tag
    ///
    /// # Example
    /// ```rust
    /// # use git_release::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
    /// repo.create_tag("v1.0.0")?;
    /// repo.push_tag("origin", "v1.0.0")?;
    /// # Ok(())
    /// # }
    /// ```
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}

/// Strips the `refs/tags/` prefix from a reference name, if present.
pub fn short_tag_name(reference: &str) -> &str {
    reference.strip_prefix("refs/tags/").unwrap_or(reference)
}
