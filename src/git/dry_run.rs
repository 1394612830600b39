use tracing::info;

use crate::error::Result;
use crate::git::Repository;

/// Repository wrapper used by `--dry-run`.
///
/// Reads go to the wrapped repository so the computed version is the real
/// one; the safety check and every write are logged and skipped.
pub struct DryRunRepository<R> {
    inner: R,
}

impl<R: Repository> DryRunRepository<R> {
    pub fn new(inner: R) -> Self {
        DryRunRepository { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Repository> Repository for DryRunRepository<R> {
    fn list_tags(&self) -> Result<Vec<String>> {
        self.inner.list_tags()
    }

    fn list_tags_for_branch(&self, branch_name: &str) -> Result<Vec<String>> {
        self.inner.list_tags_for_branch(branch_name)
    }

    fn latest_commit_hash(&self) -> Result<String> {
        self.inner.latest_commit_hash()
    }

    fn exists_tag(&self, name: &str) -> Result<bool> {
        self.inner.exists_tag(name)
    }

    fn is_safe_to_release(&self, remote: &str, _allow_dirty: bool) -> Result<()> {
        info!(remote, "dry run: skipping repository safety checks");
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        info!(tag = name, "dry run: not creating tag");
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        info!(tag = name, "dry run: not deleting tag");
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        info!(tag = name, remote, "dry run: not pushing tag");
        Ok(())
    }
}
