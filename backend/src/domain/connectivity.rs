//! Connectivity outcomes shared by the platform checkers and the aggregator.
//!
//! Platform failures travel as data: each platform produces a
//! [`PlatformReport`] carrying either its value or a list of unique
//! [`ErrorMessage`]s, always alongside an [`OutcomeStatus`]. The aggregator
//! folds two reports into one [`ConnectivityReport`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP-style status attached to every outcome.
///
/// Kept as a plain number so the domain does not depend on any one HTTP
/// stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutcomeStatus(u16);

impl OutcomeStatus {
    /// Successful outcome.
    pub const OK: Self = Self(200);
    /// Default status when an error carries no better one.
    pub const BAD_REQUEST: Self = Self(400);
    /// Upstream refused access.
    pub const FORBIDDEN: Self = Self(403);
    /// Developer unknown to the platform.
    pub const NOT_FOUND: Self = Self(404);
    /// Upstream rate limit.
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    /// Persistence or other internal failure.
    pub const INTERNAL_ERROR: Self = Self(500);
    /// Upstream answered with a body that could not be decoded.
    pub const BAD_GATEWAY: Self = Self(502);
    /// Upstream could not be reached.
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    /// Wrap a raw status code.
    pub const fn from_u16(code: u16) -> Self {
        Self(code)
    }

    /// Raw status code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Whether the status is in the 2xx range.
    ///
    /// # Examples
    /// ```
    /// use social_connected::domain::OutcomeStatus;
    ///
    /// assert!(OutcomeStatus::OK.is_success());
    /// assert!(!OutcomeStatus::TOO_MANY_REQUESTS.is_success());
    /// ```
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One error message surfaced to callers.
///
/// Most messages are plain text. Upstream refusals (403, 429, ...) are
/// passed through verbatim, so a message may also hold the JSON payload the
/// platform returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMessage(Value);

impl ErrorMessage {
    /// Plain text message.
    pub fn text(message: impl Into<String>) -> Self {
        Self(Value::String(message.into()))
    }

    /// Raw upstream payload: JSON when it parses, lossy UTF-8 text otherwise.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use social_connected::domain::ErrorMessage;
    ///
    /// let parsed = ErrorMessage::payload(br#"{"message":"rate limited"}"#);
    /// assert_eq!(parsed.as_value(), &json!({"message": "rate limited"}));
    ///
    /// let raw = ErrorMessage::payload(b"gateway timeout");
    /// assert_eq!(raw.to_string(), "gateway timeout");
    /// ```
    pub fn payload(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self(value),
            Err(_) => Self::text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ErrorMessage {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// Ordered list of error messages where each message appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMessages(Vec<ErrorMessage>);

impl ErrorMessages {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding a single message.
    pub fn single(message: ErrorMessage) -> Self {
        Self(vec![message])
    }

    /// Append a message unless an equal one is already present.
    pub fn push(&mut self, message: ErrorMessage) {
        if !self.0.contains(&message) {
            self.0.push(message);
        }
    }

    /// Append every message from `other` in order, without deduplicating
    /// across the two lists.
    pub fn append(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the messages in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorMessage> {
        self.0.iter()
    }

    /// Consume the list.
    pub fn into_vec(self) -> Vec<ErrorMessage> {
        self.0
    }
}

impl FromIterator<ErrorMessage> for ErrorMessages {
    fn from_iter<I: IntoIterator<Item = ErrorMessage>>(iter: I) -> Self {
        let mut messages = Self::new();
        for message in iter {
            messages.push(message);
        }
        messages
    }
}

impl<'a> IntoIterator for &'a ErrorMessages {
    type Item = &'a ErrorMessage;
    type IntoIter = std::slice::Iter<'a, ErrorMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of one platform check plus the status of the call that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformReport<T> {
    /// Platform value or the errors that prevented computing it.
    pub result: Result<T, ErrorMessages>,
    /// Status reflecting the transport outcome.
    pub status: OutcomeStatus,
}

impl<T> PlatformReport<T> {
    /// Successful report with the given status.
    pub fn success(value: T, status: OutcomeStatus) -> Self {
        Self {
            result: Ok(value),
            status,
        }
    }

    /// Failed report with the given status.
    pub fn failure(errors: ErrorMessages, status: OutcomeStatus) -> Self {
        Self {
            result: Err(errors),
            status,
        }
    }
}

/// Organisations shared by both developers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationOverlap {
    /// Whether at least one organisation is shared.
    pub connected: bool,
    /// Every shared organisation login, in the target's membership order.
    pub organizations: Vec<String>,
}

impl OrganizationOverlap {
    /// Compare the target's memberships against the source's.
    ///
    /// Logins are compared exactly; the full target list is scanned so every
    /// shared login is collected once.
    ///
    /// # Examples
    /// ```
    /// use social_connected::domain::OrganizationOverlap;
    ///
    /// let target = vec!["acme".to_owned(), "rustaceans".to_owned()];
    /// let source = vec!["rustaceans".to_owned()];
    /// let overlap = OrganizationOverlap::between(&target, &source);
    /// assert!(overlap.connected);
    /// assert_eq!(overlap.organizations, vec!["rustaceans".to_owned()]);
    /// ```
    pub fn between(target_orgs: &[String], source_orgs: &[String]) -> Self {
        let mut organizations: Vec<String> = Vec::new();
        for login in target_orgs {
            if source_orgs.contains(login) && !organizations.contains(login) {
                organizations.push(login.clone());
            }
        }
        Self {
            connected: !organizations.is_empty(),
            organizations,
        }
    }
}

/// Organisation platform report.
pub type OrganizationReport = PlatformReport<OrganizationOverlap>;

/// Follow platform report; the value is the mutual-follow flag.
pub type FollowReport = PlatformReport<bool>;

/// Body of an aggregated connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectivityOutcome {
    /// Both platforms answered.
    Connected { connected: bool },
    /// At least one platform, or persistence, failed.
    Errors { errors: ErrorMessages },
}

/// Aggregated outcome plus the single resolved status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Serialisable body.
    pub outcome: ConnectivityOutcome,
    /// Resolved status.
    pub status: OutcomeStatus,
}

impl ConnectivityReport {
    /// Successful check.
    pub fn connected(connected: bool) -> Self {
        Self {
            outcome: ConnectivityOutcome::Connected { connected },
            status: OutcomeStatus::OK,
        }
    }

    /// Failed check.
    pub fn errors(errors: ErrorMessages, status: OutcomeStatus) -> Self {
        Self {
            outcome: ConnectivityOutcome::Errors { errors },
            status,
        }
    }
}

/// Status reported when at least one platform failed.
///
/// Starts from 400, then takes the organisation status when it is not a
/// success, then the follow status when it is not a success. The follow
/// status therefore wins when both failed.
///
/// # Examples
/// ```
/// use social_connected::domain::{resolve_error_status, OutcomeStatus};
///
/// let status = resolve_error_status(OutcomeStatus::NOT_FOUND, OutcomeStatus::TOO_MANY_REQUESTS);
/// assert_eq!(status, OutcomeStatus::TOO_MANY_REQUESTS);
/// ```
pub fn resolve_error_status(
    organization_status: OutcomeStatus,
    follow_status: OutcomeStatus,
) -> OutcomeStatus {
    let mut status = OutcomeStatus::BAD_REQUEST;
    if !organization_status.is_success() {
        status = organization_status;
    }
    if !follow_status.is_success() {
        status = follow_status;
    }
    status
}
