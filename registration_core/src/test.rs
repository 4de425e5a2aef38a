use crate::reference::{BranchId, RoleId, BRANCHES, ROLES};
use crate::RegistrationDraft;

proptest::prop_compose! {
    pub fn role_id()(idx in 0..ROLES.len()) -> RoleId {
        ROLES[idx].id
    }
}

proptest::prop_compose! {
    pub fn branch_id()(idx in 0..BRANCHES.len()) -> BranchId {
        BRANCHES[idx].id
    }
}

proptest::prop_compose! {
    pub fn roles()(ids in proptest::sample::subsequence(
        ROLES.iter().map(|role| role.id).collect::<Vec<_>>(),
        0..=ROLES.len(),
    )) -> Vec<RoleId> {
        ids
    }
}

proptest::prop_compose! {
    pub fn draft()(
        full_name in "[A-Za-zÀ-ú ]{0,24}",
        employee_code in proptest::option::of("A[0-9]{5}"),
        email in "[a-z.]{0,12}@[a-z]{1,8}\\.com",
        password in ".{0,16}",
        roles in roles(),
        branch in proptest::option::of(branch_id()),
    ) -> RegistrationDraft {
        roles.into_iter().fold(
            RegistrationDraft::new()
                .with_full_name(full_name)
                .with_employee_code(employee_code.unwrap_or_default())
                .with_email(email)
                .with_password(password)
                .with_branch(branch),
            |draft, role| draft.with_role(role, true),
        )
    }
}

proptest::prop_compose! {
    /// A draft that passes every local check.
    pub fn submittable_draft()(
        draft in draft(),
        password in "[a-zA-Z0-9]{8,20}",
        role in role_id(),
    ) -> RegistrationDraft {
        draft
            .with_full_name("João Silva")
            .with_email("joao@empresa.com")
            .with_password(password)
            .with_role(role, true)
    }
}
