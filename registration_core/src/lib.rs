//! Common code for registering users: the form state, its validation rules,
//! and the API we submit to. Nothing in here knows about terminals.

/// Branches and roles a user can be assigned.
pub mod reference;
pub use reference::{Branch, BranchId, Role, RoleId};

/// The in-progress registration data.
pub mod draft;
pub use draft::RegistrationDraft;

/// Client-side checks run before we submit.
pub mod validate;
pub use validate::validate;

/// Where the form is in its lifecycle.
pub mod phase;
pub use phase::Phase;

/// Owner of the draft and the phase.
pub mod form;
pub use form::Form;

/// Talk to the registration API.
pub mod api;

#[cfg(test)]
mod test;
