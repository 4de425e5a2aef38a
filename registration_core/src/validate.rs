use crate::RegistrationDraft;

/// Passwords shorter than this are refused before we ever talk to the server.
///
/// Length is counted in Unicode scalar values (`str::chars`), not bytes and
/// not UTF-16 code units, so "😀😀😀😀" is 4 long here.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a draft can't be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Invalid {
    #[error("A senha deve ter pelo menos 8 caracteres")]
    PasswordTooShort,

    #[error("Selecione pelo menos um cargo")]
    NoRoleSelected,
}

/// Run the client-side rules against a draft. The password rule runs first
/// and only the first failure is reported. Name, email, and branch are left
/// to the server.
///
/// ## Errors
///
/// - `Invalid::PasswordTooShort` if the password has fewer than
///   `MIN_PASSWORD_LENGTH` characters
/// - `Invalid::NoRoleSelected` if no role is checked
pub fn validate(draft: &RegistrationDraft) -> Result<(), Invalid> {
    if draft.password().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Invalid::PasswordTooShort);
    }

    if draft.roles().is_empty() {
        return Err(Invalid::NoRoleSelected);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RoleId;
    use proptest::{prop_assert_eq, proptest};

    fn with_role() -> RegistrationDraft {
        RegistrationDraft::new().with_role(RoleId::new(1).unwrap(), true)
    }

    #[test]
    fn accepts_exactly_eight_characters() {
        let draft = with_role().with_password("12345678");

        assert_eq!(validate(&draft), Ok(()));
    }

    #[test]
    fn rejects_seven_characters() {
        let draft = with_role().with_password("1234567");

        assert_eq!(validate(&draft), Err(Invalid::PasswordTooShort));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 7 characters, but 14 bytes
        let draft = with_role().with_password("ááááááá");

        assert_eq!(validate(&draft), Err(Invalid::PasswordTooShort));
    }

    #[test]
    fn astral_characters_count_once() {
        // 8 UTF-16 code units, 4 characters
        let draft = with_role().with_password("😀😀😀😀");

        assert_eq!(validate(&draft), Err(Invalid::PasswordTooShort));
    }

    #[test]
    fn password_is_checked_before_roles() {
        let draft = RegistrationDraft::new().with_password("short");

        assert_eq!(validate(&draft), Err(Invalid::PasswordTooShort));
    }

    #[test]
    fn requires_a_role() {
        let draft = RegistrationDraft::new().with_password("senha1234");

        assert_eq!(validate(&draft), Err(Invalid::NoRoleSelected));
    }

    #[test]
    fn ignores_blank_name_and_email() {
        let draft = with_role().with_password("senha1234");

        assert_eq!(validate(&draft), Ok(()));
    }

    proptest! {
        #[test]
        fn short_passwords_are_always_rejected(
            draft in crate::test::draft(),
            password in ".{0,7}",
        ) {
            let draft = draft.with_password(password);

            prop_assert_eq!(validate(&draft), Err(Invalid::PasswordTooShort));
        }

        #[test]
        fn no_roles_is_always_rejected(
            draft in crate::test::draft(),
            password in "[a-z0-9]{8,16}",
        ) {
            let draft = crate::reference::ROLES
                .iter()
                .fold(draft.with_password(password), |d, role| d.with_role(role.id, false));

            prop_assert_eq!(validate(&draft), Err(Invalid::NoRoleSelected));
        }

        #[test]
        fn submittable_drafts_are_valid(draft in crate::test::submittable_draft()) {
            prop_assert_eq!(validate(&draft), Ok(()));
        }
    }
}
