use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GitReleaseError, Result};

/// Matches `major.minor.patch` with an optional `-RC<n>` / `-RC.<n>` suffix anywhere in a string.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)\.(\d+)(?:-RC\.?(\d+(?:\.\d+)*))?")
        .expect("version pattern is a valid regex")
});

/// Position of a component inside a [`Version`], ordered from most to least significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    Major,
    Minor,
    Patch,
    Pre,
}

/// How the release-candidate counter is rendered after `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreReleaseStyle {
    /// `v1.2.3-RC.4`
    #[default]
    Dotted,
    /// `v1.2.3-RC4`
    Compact,
}

/// Semantic version with a numeric release-candidate counter.
///
/// `pre == 0` marks a final release; any positive value is the ordinal of the
/// release candidate leading up to `major.minor.patch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32, pre: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            pre,
        }
    }

    /// Extracts a version from an arbitrary string such as `refs/tags/v1.2.3-RC4`.
    ///
    /// Never fails: input without a `major.minor.patch` triple yields `0.0.0`,
    /// and any component that does not fit a `u32` reads as zero.
    pub fn parse(raw: &str) -> Self {
        Self::find(raw).unwrap_or_default()
    }

    fn find(raw: &str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(raw)?;
        let number = |group: usize| {
            captures
                .get(group)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };

        Some(Version {
            major: number(1),
            minor: number(2),
            patch: number(3),
            pre: number(4),
        })
    }

    /// Whether this version is a release candidate rather than a final release.
    pub fn is_release_candidate(&self) -> bool {
        self.pre > 0
    }

    /// Advances the version according to the requested bump flags.
    ///
    /// A pending release candidate is promoted (its counter cleared) when any
    /// release-type bump is requested, or when no flag is given at all.
    /// Otherwise the most significant requested component is bumped, and `pre`
    /// then starts or continues a release-candidate series on top of it.
    pub fn increase(&mut self, major: bool, minor: bool, patch: bool, pre: bool) {
        let release_candidate = self.is_release_candidate();

        if release_candidate && (major || minor || patch) {
            self.pre = 0;
            return;
        }

        if major {
            self.bump(Component::Major);
        } else if minor {
            self.bump(Component::Minor);
        } else if patch {
            self.bump(Component::Patch);
        } else if pre {
            // a new candidate series always targets the next patch
            if !release_candidate {
                self.bump(Component::Patch);
            }
        } else {
            if release_candidate {
                self.pre = 0;
            } else {
                self.bump(Component::Patch);
            }
            return;
        }

        self.increase_pre(pre);
    }

    /// Increments the release-candidate counter when `pre` is set.
    pub fn increase_pre(&mut self, pre: bool) {
        if pre {
            self.bump(Component::Pre);
        }
    }

    /// Increments the component at `barrier` and zeroes every less significant one.
    pub fn bump(&mut self, barrier: Component) {
        let barrier = barrier as usize;
        for (position, value) in self.components_mut().into_iter().enumerate() {
            match position.cmp(&barrier) {
                Ordering::Less => {}
                Ordering::Equal => *value = value.wrapping_add(1),
                Ordering::Greater => *value = 0,
            }
        }
    }

    fn components_mut(&mut self) -> [&mut u32; 4] {
        [
            &mut self.major,
            &mut self.minor,
            &mut self.patch,
            &mut self.pre,
        ]
    }

    /// `major.minor.patch` packed big-endian into one integer, 32 bits per component.
    pub fn packed_release(&self) -> u128 {
        (u128::from(self.major) << 64) | (u128::from(self.minor) << 32) | u128::from(self.patch)
    }

    /// [`packed_release`](Self::packed_release) with `pre` appended as the lowest group.
    pub fn packed(&self) -> u128 {
        (self.packed_release() << 32) | u128::from(self.pre)
    }

    /// Renders the version as a tag name using the given pre-release style.
    pub fn to_tag(&self, style: PreReleaseStyle) -> String {
        let mut tag = format!("v{}.{}.{}", self.major, self.minor, self.patch);
        if self.is_release_candidate() {
            match style {
                PreReleaseStyle::Dotted => tag.push_str(&format!("-RC.{}", self.pre)),
                PreReleaseStyle::Compact => tag.push_str(&format!("-RC{}", self.pre)),
            }
        }
        tag
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tag(PreReleaseStyle::default()))
    }
}

/// Strict counterpart of [`Version::parse`] for versions typed by a user.
impl FromStr for Version {
    type Err = GitReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::find(s).ok_or_else(|| {
            GitReleaseError::version(format!(
                "'{}' is not a valid version, expected MAJOR.MINOR.PATCH[-RC<n>]",
                s
            ))
        })
    }
}

/// Final releases sort above every release candidate of the same `major.minor.patch`.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.packed_release()
            .cmp(&other.packed_release())
            .then_with(
                || match (self.is_release_candidate(), other.is_release_candidate()) {
                    (false, true) => Ordering::Greater,
                    (true, false) => Ordering::Less,
                    _ => self.pre.cmp(&other.pre),
                },
            )
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
