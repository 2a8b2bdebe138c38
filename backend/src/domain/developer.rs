//! Developer identities checked for connectivity.
//!
//! A [`DeveloperHandle`] is the opaque login a developer uses on both
//! platforms. A [`DeveloperPair`] orders two handles: the relationship check
//! is directional (source follows target), the organisation check is not.

use std::fmt;

/// Longest handle accepted, matching the persisted column width.
pub const DEVELOPER_HANDLE_MAX: usize = 80;

/// Validation failures for developer handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeveloperValidationError {
    /// The handle was empty or only whitespace.
    #[error("developer handle must not be empty")]
    Empty,
    /// The handle exceeds [`DEVELOPER_HANDLE_MAX`] characters.
    #[error("developer handle must be at most {max} characters")]
    TooLong { max: usize },
}

/// Non-empty developer login shared by both platforms.
///
/// # Examples
/// ```
/// use social_connected::domain::DeveloperHandle;
///
/// let handle = DeveloperHandle::new("octocat").expect("valid handle");
/// assert_eq!(handle.as_str(), "octocat");
/// assert!(DeveloperHandle::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeveloperHandle(String);

impl DeveloperHandle {
    /// Validate and wrap a raw handle.
    ///
    /// The handle is kept verbatim; surrounding whitespace is not trimmed
    /// because platforms treat logins as opaque.
    pub fn new(raw: impl Into<String>) -> Result<Self, DeveloperValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DeveloperValidationError::Empty);
        }
        if raw.chars().count() > DEVELOPER_HANDLE_MAX {
            return Err(DeveloperValidationError::TooLong {
                max: DEVELOPER_HANDLE_MAX,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the handle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DeveloperHandle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DeveloperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered `(source, target)` pair of developers under test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeveloperPair {
    source: DeveloperHandle,
    target: DeveloperHandle,
}

impl DeveloperPair {
    /// Pair two validated handles.
    pub fn new(source: DeveloperHandle, target: DeveloperHandle) -> Self {
        Self { source, target }
    }

    /// Validate both raw handles and pair them.
    ///
    /// # Examples
    /// ```
    /// use social_connected::domain::DeveloperPair;
    ///
    /// let pair = DeveloperPair::parse("dev1", "dev2").expect("valid pair");
    /// assert_eq!(pair.source().as_str(), "dev1");
    /// assert_eq!(pair.target().as_str(), "dev2");
    /// ```
    pub fn parse(source: &str, target: &str) -> Result<Self, DeveloperValidationError> {
        Ok(Self::new(
            DeveloperHandle::new(source)?,
            DeveloperHandle::new(target)?,
        ))
    }

    /// Developer whose relationship is inspected.
    pub fn source(&self) -> &DeveloperHandle {
        &self.source
    }

    /// Developer the source is compared against.
    pub fn target(&self) -> &DeveloperHandle {
        &self.target
    }

    /// The same developers with source and target swapped.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for DeveloperPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab("\t")]
    fn blank_handles_are_rejected(#[case] raw: &str) {
        assert_eq!(
            DeveloperHandle::new(raw),
            Err(DeveloperValidationError::Empty)
        );
    }

    #[rstest]
    fn overlong_handles_are_rejected() {
        let raw = "a".repeat(DEVELOPER_HANDLE_MAX + 1);
        assert_eq!(
            DeveloperHandle::new(raw),
            Err(DeveloperValidationError::TooLong {
                max: DEVELOPER_HANDLE_MAX
            })
        );
    }

    #[rstest]
    fn handles_are_kept_verbatim() {
        let handle = DeveloperHandle::new("Dev-1").expect("valid handle");
        assert_eq!(handle.to_string(), "Dev-1");
    }

    #[rstest]
    fn parse_reports_the_first_invalid_handle() {
        let err = DeveloperPair::parse("", "dev2").expect_err("source is blank");
        assert_eq!(err, DeveloperValidationError::Empty);
    }

    #[rstest]
    fn reversed_swaps_roles() {
        let pair = DeveloperPair::parse("dev1", "dev2").expect("valid pair");
        let reversed = pair.reversed();
        assert_eq!(reversed.source().as_str(), "dev2");
        assert_eq!(reversed.target().as_str(), "dev1");
        assert_eq!(reversed.reversed(), pair);
    }
}
