//! Ordering over collections of versions, used to pick the latest tag.

use crate::domain::Version;
use crate::error::{GitReleaseError, Result};

/// Collection of versions parsed from tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Versions(Vec<Version>);

impl Versions {
    /// Parses every tag leniently; tags without a version take part as `v0.0.0`.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Versions(
            tags.into_iter()
                .map(|tag| Version::parse(tag.as_ref()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Version> {
        self.0.iter()
    }

    /// Reports whether the element at `i` sorts before the element at `j`.
    ///
    /// Kept bit-for-bit compatible with the ordering of previously published
    /// tag listings: when `major.minor.patch` match, a final release is never
    /// less and a release candidate is less than a final release; in every
    /// other case the full packed values are compared with `<=`, so equal
    /// versions report `true` in both directions. Use [`Ord`] on [`Version`]
    /// wherever a strict order is required.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn less(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.0[i], &self.0[j]);
        if a.packed_release() == b.packed_release() {
            if !a.is_release_candidate() {
                return false;
            }
            if !b.is_release_candidate() {
                return true;
            }
        }

        a.packed() <= b.packed()
    }

    /// Versions in ascending order.
    pub fn sorted(&self) -> Vec<Version> {
        let mut versions = self.0.clone();
        versions.sort();
        versions
    }

    /// The greatest version, or `None` for an empty collection.
    pub fn latest(&self) -> Option<Version> {
        self.0.iter().max().copied()
    }
}

impl FromIterator<Version> for Versions {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        Versions(iter.into_iter().collect())
    }
}

impl IntoIterator for Versions {
    type Item = Version;
    type IntoIter = std::vec::IntoIter<Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Finds the latest version among raw tag names.
///
/// # Errors
/// * [`GitReleaseError::EmptyTagSet`] - if `tags` is empty
pub fn find_latest<I, S>(tags: I) -> Result<Version>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Versions::from_tags(tags)
        .latest()
        .ok_or(GitReleaseError::EmptyTagSet)
}
