use thiserror::Error;

/// Record kind a failed lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Task,
    Poll,
    Ticket,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Task => "Task",
            EntityKind::Poll => "Poll",
            EntityKind::Ticket => "Ticket",
        };
        f.write_str(name)
    }
}

/// Every failure the core can produce. The host maps `code()` to its
/// transport's status codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Poll is closed")]
    PollClosed,

    #[error("You have already voted")]
    AlreadyVoted,

    #[error("Invalid option")]
    InvalidOption,

    #[error("Invalid status change from {from} to {to}")]
    InvalidState {
        from: &'static str,
        to: &'static str,
    },
}

impl CoreError {
    /// Stable machine-readable code, independent of the message text.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::PollClosed => "POLL_CLOSED",
            CoreError::AlreadyVoted => "ALREADY_VOTED",
            CoreError::InvalidOption => "INVALID_OPTION",
            CoreError::InvalidState { .. } => "INVALID_STATE",
        }
    }
}
