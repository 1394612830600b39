use std::fmt;

/// Non-fatal issues met while releasing. These are reported to the user but
/// never change the outcome of the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag carries no `major.minor.patch` and takes part in ordering as v0.0.0
    UnparsableTag { tag: String },
    /// Tag was created locally, the push failed, and removing the tag failed too
    RollbackFailed { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag } => {
                write!(
                    f,
                    "Tag '{}' contains no version and is treated as v0.0.0",
                    tag
                )
            }
            BoundaryWarning::RollbackFailed { tag, reason } => {
                write!(
                    f,
                    "Could not remove local tag '{}' after the failed push ({}); remove it with `git tag -d {}`",
                    tag, reason, tag
                )
            }
        }
    }
}
