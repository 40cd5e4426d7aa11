//! Common error infrastructure for arena-core.
//!
//! The combat core has no fatal errors: every failure is an expected,
//! named outcome. This module provides the shared classification used by
//! those outcomes so callers (UI feedback, AI scoring, logs) can treat them
//! uniformly. Domain-specific errors live next to the operations that
//! produce them.

use crate::state::EntityId;

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed on a later tick (cooldown, energy, range).
    Recoverable,
    /// The request itself is wrong (empty slot, missing target).
    Validation,
    /// Content or roster inconsistency.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Whether retrying the identical request later can succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Who and which slot a rejected request came from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    pub actor: Option<EntityId>,
    pub slot: Option<usize>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actor: None,
            slot: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }
}

/// Shared classification implemented by every error type in the crate.
///
/// Error codes are stable strings; consumers branch and aggregate on them
/// rather than on `Display` output.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
