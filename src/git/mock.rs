use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use crate::error::{GitReleaseError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
///
/// Tags are kept in memory; writes performed through the [Repository] trait
/// are recorded so tests can inspect them afterwards.
pub struct MockRepository {
    tags: RefCell<BTreeSet<String>>,
    branch_tags: HashMap<String, Vec<String>>,
    pushed: RefCell<Vec<(String, String)>>,
    safety_checks: Cell<usize>,
    dirty: bool,
    unsafe_reason: Option<String>,
    push_failure: Option<String>,
    delete_failure: Option<String>,
}

impl MockRepository {
    /// Hash reported by [Repository::latest_commit_hash]
    pub const HEAD_HASH: &'static str = "0123456789abcdef0123456789abcdef01234567";

    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(BTreeSet::new()),
            branch_tags: HashMap::new(),
            pushed: RefCell::new(Vec::new()),
            safety_checks: Cell::new(0),
            dirty: false,
            unsafe_reason: None,
            push_failure: None,
            delete_failure: None,
        }
    }

    /// Create a mock repository holding the given tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut repo = Self::new();
        for tag in tags {
            repo.add_tag(tag);
        }
        repo
    }

    /// Add a tag (name without `refs/tags/`)
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.get_mut().insert(name.into());
    }

    /// Mark a tag as reachable from a branch
    pub fn add_branch_tag(&mut self, branch: impl Into<String>, name: impl Into<String>) {
        let name = name.into();
        self.add_tag(name.clone());
        self.branch_tags.entry(branch.into()).or_default().push(name);
    }

    /// Report uncommitted changes from the safety check
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Fail the safety check with the given reason, even with `allow_dirty`
    pub fn set_unsafe(&mut self, reason: impl Into<String>) {
        self.unsafe_reason = Some(reason.into());
    }

    pub fn fail_push(&mut self, reason: impl Into<String>) {
        self.push_failure = Some(reason.into());
    }

    pub fn fail_delete(&mut self, reason: impl Into<String>) {
        self.delete_failure = Some(reason.into());
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.borrow().contains(name)
    }

    /// Tags pushed so far, in push order
    pub fn pushed_tags(&self) -> Vec<String> {
        self.pushed
            .borrow()
            .iter()
            .map(|(_, tag)| tag.clone())
            .collect()
    }

    /// Remotes pushed to so far, in push order
    pub fn pushed_remotes(&self) -> Vec<String> {
        self.pushed
            .borrow()
            .iter()
            .map(|(remote, _)| remote.clone())
            .collect()
    }

    /// Number of times the safety check ran
    pub fn safety_checks(&self) -> usize {
        self.safety_checks.get()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .tags
            .borrow()
            .iter()
            .map(|name| format!("refs/tags/{}", name))
            .collect())
    }

    fn list_tags_for_branch(&self, branch_name: &str) -> Result<Vec<String>> {
        self.branch_tags
            .get(branch_name)
            .map(|tags| tags.iter().map(|name| format!("refs/tags/{}", name)).collect())
            .ok_or_else(|| GitReleaseError::branch(format!("Branch not found: {}", branch_name)))
    }

    fn latest_commit_hash(&self) -> Result<String> {
        Ok(Self::HEAD_HASH.to_string())
    }

    fn exists_tag(&self, name: &str) -> Result<bool> {
        Ok(self.has_tag(name))
    }

    fn is_safe_to_release(&self, _remote: &str, allow_dirty: bool) -> Result<()> {
        self.safety_checks.set(self.safety_checks.get() + 1);

        if self.dirty && !allow_dirty {
            return Err(GitReleaseError::unsafe_repo(
                "your repository has uncommitted changes",
            ));
        }
        match &self.unsafe_reason {
            Some(reason) => Err(GitReleaseError::unsafe_repo(reason.clone())),
            None => Ok(()),
        }
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if !self.tags.borrow_mut().insert(name.to_string()) {
            return Err(GitReleaseError::tag_creation(format!(
                "tag '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        if let Some(reason) = &self.delete_failure {
            return Err(GitReleaseError::tag_deletion(reason.clone()));
        }
        self.tags.borrow_mut().remove(name);
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if let Some(reason) = &self.push_failure {
            return Err(GitReleaseError::push(reason.clone()));
        }
        if !self.has_tag(name) {
            return Err(GitReleaseError::push(format!("tag '{}' does not exist", name)));
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
