//! # Resource State
//!
//! The observable view state of one remote resource.
//!
//! Instead of separate `loading` / `error` / `data` flags, the state is a
//! single enum. A pending resource cannot also carry an error, and a failed
//! one cannot claim fresh data. Data from the most recent success survives
//! later transitions as `last`, so the presentation layer can keep showing it
//! while a reload is in flight or after a failed submit.

use crate::error::ControllerError;
use std::fmt;

/// The four lifecycle phases, without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Pending,
    Success,
    Failure,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Idle => "idle",
            Status::Pending => "pending",
            Status::Success => "success",
            Status::Failure => "failure",
        };
        f.write_str(name)
    }
}

/// Snapshot of a resource's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing in flight. `last` is non-authoritative.
    Idle { last: Option<T> },
    /// An operation is in flight. `last` is non-authoritative.
    Pending { last: Option<T> },
    /// The last load resolved with `data`.
    Success { data: T },
    /// The last operation failed. `last` is the data from an earlier success.
    Failure {
        error: ControllerError,
        last: Option<T>,
    },
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Idle { last: None }
    }
}

impl<T> ResourceState<T> {
    pub fn status(&self) -> Status {
        match self {
            ResourceState::Idle { .. } => Status::Idle,
            ResourceState::Pending { .. } => Status::Pending,
            ResourceState::Success { .. } => Status::Success,
            ResourceState::Failure { .. } => Status::Failure,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceState::Idle { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResourceState::Pending { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResourceState::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResourceState::Failure { .. })
    }

    /// Authoritative data on success, otherwise the last-known value.
    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Success { data } => Some(data),
            ResourceState::Idle { last }
            | ResourceState::Pending { last }
            | ResourceState::Failure { last, .. } => last.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&ControllerError> {
        match self {
            ResourceState::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    fn into_last(self) -> Option<T> {
        match self {
            ResourceState::Success { data } => Some(data),
            ResourceState::Idle { last }
            | ResourceState::Pending { last }
            | ResourceState::Failure { last, .. } => last,
        }
    }

    pub(crate) fn into_pending(self) -> Self {
        ResourceState::Pending {
            last: self.into_last(),
        }
    }

    pub(crate) fn into_idle(self) -> Self {
        ResourceState::Idle {
            last: self.into_last(),
        }
    }

    pub(crate) fn into_failure(self, error: ControllerError) -> Self {
        ResourceState::Failure {
            error,
            last: self.into_last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn network() -> ControllerError {
        TransportError::Network("connection refused".into()).into()
    }

    #[test]
    fn test_default_is_idle_without_data() {
        let state = ResourceState::<u32>::default();
        assert_eq!(state.status(), Status::Idle);
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_last_known_data_survives_transitions() {
        let state = ResourceState::Success { data: 7 };
        let pending = state.into_pending();
        assert!(pending.is_pending());
        assert_eq!(pending.data(), Some(&7));

        let failed = pending.into_failure(network());
        assert!(failed.is_failure());
        assert_eq!(failed.data(), Some(&7));
        assert!(failed.error().unwrap().is_transport());

        let idle = failed.into_idle();
        assert!(idle.is_idle());
        assert!(idle.error().is_none());
        assert_eq!(idle.data(), Some(&7));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Pending.to_string(), "pending");
        assert_eq!(Status::Failure.to_string(), "failure");
    }
}
