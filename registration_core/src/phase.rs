use crate::api::register;

/// Where the form is in its lifecycle. Only one of these can be true at a
/// time, so there's no way to be both submitting and done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The user is filling in the form. If the last submission failed, we
    /// keep its message around to show them.
    Editing { last_error: Option<String> },

    /// We're waiting to hear back from the server
    Submitting,

    /// The server created the user. We stay here until the user asks to
    /// register someone else.
    Succeeded(register::Resp),
}

impl Phase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The message from the last failed submission, if we're showing one.
    pub fn last_error(&self) -> Option<&str> {
        match self {
            Self::Editing { last_error } => last_error.as_deref(),
            _ => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Editing { last_error: None }
    }
}
