use crate::api::{self, register};
use crate::draft::RequiredField;
use crate::validate::{self, Invalid};
use crate::{Phase, RegistrationDraft, RoleId};
use std::mem;

/// Holds the draft and the phase for one registration form. Only submission
/// changes the phase; editing functions only swap out the draft.
#[derive(Debug, Default)]
pub struct Form {
    draft: RegistrationDraft,
    phase: Phase,
}

impl Form {
    /// A fresh, empty form
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Replace the draft with an edited copy.
    pub fn edit(&mut self, change: impl FnOnce(RegistrationDraft) -> RegistrationDraft) {
        let current = mem::take(&mut self.draft);
        self.draft = change(current);
    }

    /// Check or uncheck a role.
    pub fn toggle_role(&mut self, role: RoleId, checked: bool) {
        self.edit(|draft| draft.with_role(role, checked));
    }

    /// Start a submission. If the draft can go out, we move to
    /// `Phase::Submitting`, clear the last error, and hand back the request
    /// to send. Otherwise nothing changes.
    ///
    /// ## Errors
    ///
    /// See `Blocked` for the reasons, which are checked in the order listed
    /// there.
    pub fn begin_submit(&mut self) -> Result<register::Req, Blocked> {
        match self.phase {
            Phase::Submitting => return Err(Blocked::InFlight),
            Phase::Succeeded(_) => return Err(Blocked::AlreadyRegistered),
            Phase::Editing { .. } => (),
        }

        if let Some(field) = self.draft.first_missing_required() {
            return Err(Blocked::MissingField(field));
        }

        validate::validate(&self.draft)?;

        self.phase = Phase::Submitting;

        Ok(register::Req::from(&self.draft))
    }

    /// Finish a submission started with `begin_submit`, whichever way it
    /// went. A success clears the draft; a failure keeps it so nobody has to
    /// type everything again.
    pub fn finish_submit(&mut self, result: api::Result<register::Resp>) {
        if !self.phase.is_submitting() {
            tracing::warn!(phase = ?self.phase, "got a submission result while not submitting; ignoring");
            return;
        }

        match result {
            Ok(resp) => {
                tracing::info!(id = resp.id, login = %resp.login, "registered user");

                self.draft = RegistrationDraft::new();
                self.phase = Phase::Succeeded(resp);
            }
            Err(err) => {
                self.phase = Phase::Editing {
                    last_error: Some(err.to_string()),
                };
            }
        }
    }

    /// Go back to an empty form after a successful registration.
    pub fn register_another(&mut self) {
        if let Phase::Succeeded(_) = self.phase {
            self.draft = RegistrationDraft::new();
            self.phase = Phase::default();
        }
    }

    /// Run a whole submission: check the draft, send it, and record the
    /// outcome. Returns the server's confirmation on success.
    ///
    /// This is the entry point for callers without an event loop. The TUI
    /// sends the request from a spawned effect instead, so it calls
    /// `begin_submit` and `finish_submit` itself; both paths go through the
    /// same transitions.
    ///
    /// ## Errors
    ///
    /// - `SubmitError::Blocked` if the submission never started (no request
    ///   is made)
    /// - `SubmitError::Api` if the request failed. The form is back in
    ///   `Phase::Editing` with the message recorded.
    pub async fn submit(
        &mut self,
        api: &api::Client,
        http: &reqwest::Client,
    ) -> Result<register::Resp, SubmitError> {
        let req = self.begin_submit()?;

        match api.register(http, &req).await {
            Ok(resp) => {
                self.finish_submit(Ok(resp.clone()));
                Ok(resp)
            }
            Err(err) => {
                let message = err.to_string();
                self.finish_submit(Err(err));
                Err(SubmitError::Api(message))
            }
        }
    }
}

/// Reasons a submission didn't start
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Blocked {
    /// A submission is already waiting on the server
    #[error("Registro em andamento")]
    InFlight,

    /// This form already registered someone; call `register_another` first
    #[error("Usuário já registrado")]
    AlreadyRegistered,

    /// A required text field is blank
    #[error("Preencha o campo {0}")]
    MissingField(RequiredField),

    /// The draft failed a client-side rule
    #[error(transparent)]
    Invalid(#[from] Invalid),
}

/// Problems from `Form::submit`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Blocked(#[from] Blocked),

    /// The API call failed. This holds the same message recorded in the
    /// phase.
    #[error("{0}")]
    Api(String),
}
