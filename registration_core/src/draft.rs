use crate::reference::{BranchId, RoleId};
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display, Formatter};

/// The registration data the user has entered so far. Drafts are values:
/// every change produces a new draft instead of editing this one in place,
/// which keeps comparing two versions of the form cheap and obvious.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    full_name: String,
    employee_code: Option<String>,
    email: String,
    password: String,
    roles: BTreeSet<RoleId>,
    branch: Option<BranchId>,
}

impl RegistrationDraft {
    /// An empty draft, as the form starts out.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_full_name(self, full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..self
        }
    }

    /// Set the employee code. A blank code counts as no code at all.
    #[must_use]
    pub fn with_employee_code(self, code: impl Into<String>) -> Self {
        let code = code.into();

        Self {
            employee_code: if code.trim().is_empty() {
                None
            } else {
                Some(code)
            },
            ..self
        }
    }

    #[must_use]
    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_branch(self, branch: Option<BranchId>) -> Self {
        Self { branch, ..self }
    }

    /// Check (`true`) or uncheck (`false`) a role. Doing the same thing twice
    /// is the same as doing it once.
    #[must_use]
    pub fn with_role(mut self, role: RoleId, checked: bool) -> Self {
        if checked {
            self.roles.insert(role);
        } else {
            self.roles.remove(&role);
        }

        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn branch(&self) -> Option<BranchId> {
        self.branch
    }

    /// Selected roles, in ascending ID order.
    pub fn roles(&self) -> &BTreeSet<RoleId> {
        &self.roles
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }

    /// Has the user entered anything at all?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The first required text field left blank, if any. These aren't part of
    /// `validate`; they play the part of a form's "required" attribute and
    /// stop a submission before any rules run.
    pub fn first_missing_required(&self) -> Option<RequiredField> {
        if self.full_name.trim().is_empty() {
            Some(RequiredField::FullName)
        } else if self.email.trim().is_empty() {
            Some(RequiredField::Email)
        } else {
            None
        }
    }
}

// Hand-written so the password never ends up in logs.
impl Debug for RegistrationDraft {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("full_name", &self.full_name)
            .field("employee_code", &self.employee_code)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .field("branch", &self.branch)
            .finish()
    }
}

/// Text fields that must be filled in before we try to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FullName,
    Email,
}

impl Display for RequiredField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName => write!(f, "Nome Completo"),
            Self::Email => write!(f, "Email"),
        }
    }
}
