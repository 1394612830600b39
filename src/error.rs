use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum GitReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("No tags found")]
    EmptyTagSet,

    #[error("Repository is not safe to release: {0}")]
    UnsafeRepoState(String),

    #[error("Failed to create tag: {0}")]
    TagCreation(String),

    #[error("Failed to delete tag: {0}")]
    TagDeletion(String),

    #[error("Failed to push: {0}")]
    Push(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, GitReleaseError>;

impl GitReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitReleaseError::Version(msg.into())
    }

    pub fn unsafe_repo(msg: impl Into<String>) -> Self {
        GitReleaseError::UnsafeRepoState(msg.into())
    }

    pub fn tag_creation(msg: impl Into<String>) -> Self {
        GitReleaseError::TagCreation(msg.into())
    }

    pub fn tag_deletion(msg: impl Into<String>) -> Self {
        GitReleaseError::TagDeletion(msg.into())
    }

    pub fn push(msg: impl Into<String>) -> Self {
        GitReleaseError::Push(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitReleaseError::Remote(msg.into())
    }

    pub fn branch(msg: impl Into<String>) -> Self {
        GitReleaseError::Branch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_empty_tag_set_display() {
        assert_eq!(GitReleaseError::EmptyTagSet.to_string(), "No tags found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_git2() {
        let git_err = git2::Error::from_str("reference not found");
        let err: GitReleaseError = git_err.into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.to_string().contains("reference not found"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitReleaseError::config("x"), "Configuration error"),
            (GitReleaseError::version("x"), "Version parsing error"),
            (
                GitReleaseError::unsafe_repo("x"),
                "Repository is not safe to release",
            ),
            (GitReleaseError::tag_creation("x"), "Failed to create tag"),
            (GitReleaseError::tag_deletion("x"), "Failed to delete tag"),
            (GitReleaseError::push("x"), "Failed to push"),
            (GitReleaseError::remote("x"), "Remote operation failed"),
            (GitReleaseError::branch("x"), "Branch error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_long_messages() {
        let long_msg = "a".repeat(1000);
        let err = GitReleaseError::push(&long_msg);
        assert!(err.to_string().contains(&long_msg));
    }
}
