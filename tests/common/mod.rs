// Helpers shared by the integration tests that need real git repositories
#![allow(dead_code)]

use git2::{BranchType, Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Setup an empty repository in a temporary directory
pub fn init_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    (temp_dir, repo)
}

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com").expect("Could not create signature")
}

/// Commit the current index on top of HEAD and return the new commit
pub fn commit(repo: &Repository, message: &str) -> Oid {
    commit_on(repo, "HEAD", message)
}

/// Commit the current index on top of `reference` (e.g. `refs/heads/feature`)
pub fn commit_on(repo: &Repository, reference: &str, message: &str) -> Oid {
    let sig = signature();
    let mut index = repo.index().expect("Could not get index");
    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let parent = repo
        .find_reference(reference)
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some(reference), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

/// Write a file into the work tree and stage it
pub fn add_file(repo: &Repository, name: &str, content: &str) {
    let workdir = repo.workdir().expect("Repository has no workdir");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");
}

pub fn tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).expect("Could not find object");
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

pub fn annotated_tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).expect("Could not find object");
    repo.tag(name, &object, &signature(), "release", false)
        .expect("Could not create annotated tag");
}

/// Name of the branch HEAD points to
pub fn head_branch(repo: &Repository) -> String {
    repo.head()
        .expect("Repository has no HEAD")
        .shorthand()
        .expect("HEAD is not valid UTF-8")
        .to_string()
}

/// Create a bare repository and register it as `origin`
pub fn add_bare_origin(repo: &Repository) -> TempDir {
    let remote_dir = TempDir::new().expect("Could not create remote dir");
    Repository::init_bare(remote_dir.path()).expect("Could not init bare repo");
    repo.remote("origin", remote_dir.path().to_str().expect("Non UTF-8 path"))
        .expect("Could not add remote");
    remote_dir
}

/// Push `branch` at its current commit to origin and make it the upstream
pub fn publish_branch(repo: &Repository, branch: &str) {
    let mut remote = repo.find_remote("origin").expect("No origin remote");
    let refspec = format!("+refs/heads/{0}:refs/heads/{0}", branch);
    remote
        .push(&[refspec.as_str()], None)
        .expect("Could not push branch");
    remote
        .fetch(&[] as &[&str], None, None)
        .expect("Could not fetch origin");

    let mut local = repo
        .find_branch(branch, BranchType::Local)
        .expect("No such local branch");
    local
        .set_upstream(Some(&format!("origin/{}", branch)))
        .expect("Could not set upstream");
}

/// Point a local branch at another commit without touching the work tree
pub fn move_branch(repo: &Repository, branch: &str, oid: Oid) {
    repo.reference(&format!("refs/heads/{}", branch), oid, true, "move branch")
        .expect("Could not move branch");
}
