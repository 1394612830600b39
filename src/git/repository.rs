use std::collections::HashSet;
use std::path::Path;

use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, StatusOptions};
use tracing::debug;

use crate::error::{GitReleaseError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn find_branch(&self, branch_name: &str) -> Result<git2::Branch<'_>> {
        self.repo
            .find_branch(branch_name, BranchType::Local)
            .or_else(|_| self.repo.find_branch(branch_name, BranchType::Remote))
            .map_err(|e| {
                GitReleaseError::branch(format!("Cannot find branch '{}': {}", branch_name, e))
            })
    }

    /// Commit a tag reference points to; annotated tags are peeled.
    fn tag_commit_oid(&self, reference: &str) -> Option<Oid> {
        self.repo
            .find_reference(reference)
            .ok()?
            .peel_to_commit()
            .ok()
            .map(|commit| commit.id())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    /// Commits ahead of and behind the upstream of the checked out branch.
    ///
    /// `None` when HEAD is detached or the branch has no upstream.
    fn upstream_divergence(&self) -> Result<Option<(usize, usize)>> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Ok(None);
        }
        let Some(branch_name) = head.shorthand() else {
            return Ok(None);
        };

        let branch = self.repo.find_branch(branch_name, BranchType::Local)?;
        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let local_oid = head.target().ok_or_else(|| {
            GitReleaseError::branch(format!("Branch '{}' has no target", branch_name))
        })?;
        let upstream_oid = upstream.get().target().ok_or_else(|| {
            GitReleaseError::branch(format!("Upstream of '{}' has no target", branch_name))
        })?;

        Ok(Some(self.repo.graph_ahead_behind(local_oid, upstream_oid)?))
    }

    fn fetch(&self, remote_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            GitReleaseError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options
            .remote_callbacks(remote_callbacks())
            .download_tags(git2::AutotagOption::None);

        // Only remote-tracking branches are updated; local tags stay untouched
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        remote
            .fetch(&[refspec_heads.as_str()], Some(&mut fetch_options), None)
            .map_err(|e| {
                GitReleaseError::remote(format!(
                    "Failed to fetch from remote '{}': {}",
                    remote_name, e
                ))
            })?;

        debug!(remote = remote_name, "fetched remote");
        Ok(())
    }
}

/// Credentials: SSH keys from `~/.ssh`, then the SSH agent, then the default helper.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags
            .iter()
            .flatten()
            .map(|name| format!("refs/tags/{}", name))
            .collect())
    }

    fn list_tags_for_branch(&self, branch_name: &str) -> Result<Vec<String>> {
        let head_oid = self.find_branch(branch_name)?.get().peel_to_commit()?.id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;
        let reachable = revwalk.collect::<std::result::Result<HashSet<Oid>, _>>()?;

        let tags = self
            .list_tags()?
            .into_iter()
            .filter(|tag| {
                self.tag_commit_oid(tag)
                    .is_some_and(|oid| reachable.contains(&oid))
            })
            .collect::<Vec<_>>();

        debug!(
            branch = branch_name,
            count = tags.len(),
            "collected tags reachable from branch"
        );
        Ok(tags)
    }

    fn latest_commit_hash(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn exists_tag(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn is_safe_to_release(&self, remote: &str, allow_dirty: bool) -> Result<()> {
        if allow_dirty {
            debug!("ignoring uncommitted changes");
        } else if self.has_uncommitted_changes()? {
            return Err(GitReleaseError::unsafe_repo(
                "your repository has uncommitted changes",
            ));
        }

        self.fetch(remote)?;

        match self.upstream_divergence()? {
            Some((ahead, _)) if ahead > 0 => Err(GitReleaseError::unsafe_repo(format!(
                "your branch has {} unpushed commit(s), please push",
                ahead
            ))),
            Some((_, behind)) if behind > 0 => Err(GitReleaseError::unsafe_repo(format!(
                "your branch is behind the remote by {} commit(s), please pull",
                behind
            ))),
            Some(_) => Ok(()),
            None => Err(GitReleaseError::unsafe_repo(
                "current branch has no upstream, cannot verify it is pushed",
            )),
        }
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.exists_tag(name)? {
            return Err(GitReleaseError::tag_creation(format!(
                "tag '{}' already exists",
                name
            )));
        }

        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| GitReleaseError::tag_creation(format!("Cannot resolve HEAD: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| {
                GitReleaseError::tag_creation(format!("Cannot create tag '{}': {}", name, e))
            })?;

        debug!(tag = name, commit = %head.id(), "created tag");
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        match self.repo.tag_delete(name) {
            Ok(()) => {
                debug!(tag = name, "deleted tag");
                Ok(())
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(tag = name, "tag already absent");
                Ok(())
            }
            Err(e) => Err(GitReleaseError::tag_deletion(format!(
                "Cannot delete tag '{}': {}",
                name, e
            ))),
        }
    }

    fn push_tag(&self, remote_name: &str, name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            GitReleaseError::push(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut callbacks = remote_callbacks();
        // The remote reports rejected references here rather than through push()'s result
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    GitReleaseError::push(format!("Network error during push: {}", e))
                }
                _ => GitReleaseError::push(format!(
                    "Cannot push tag '{}' to '{}': {}",
                    name, remote_name, e
                )),
            })?;

        debug!(tag = name, remote = remote_name, "pushed tag");
        Ok(())
    }
}
