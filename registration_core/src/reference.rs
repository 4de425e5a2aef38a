use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;

/// The ID of one of the company's branches. You can only get one of these for
/// a branch listed in `BRANCHES`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BranchId(u32);

impl BranchId {
    /// Look up a branch ID, returning `None` if we don't know about it.
    pub fn new(id: u32) -> Option<Self> {
        BRANCHES.iter().map(|branch| branch.id).find(|b| b.0 == id)
    }
}

/// The ID of a role a user can hold. As with `BranchId`, only IDs listed in
/// `ROLES` can be constructed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoleId(u32);

impl RoleId {
    /// Look up a role ID, returning `None` if we don't know about it.
    pub fn new(id: u32) -> Option<Self> {
        ROLES.iter().map(|role| role.id).find(|r| r.0 == id)
    }
}

macro_rules! id_traits {
    ($name:ident) => {
        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = u32;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = u32::deserialize(deserializer)?;

                Self::new(raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} {raw}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

id_traits!(BranchId);
id_traits!(RoleId);

/// A company branch
#[derive(Debug, PartialEq, Eq)]
pub struct Branch {
    pub id: BranchId,
    pub name: &'static str,
}

/// A role that grants permissions in the system
#[derive(Debug, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: &'static str,
}

/// Every branch we know about, in display order.
pub static BRANCHES: &[Branch] = &[
    Branch { id: BranchId(1), name: "HOLDING" },
    Branch { id: BranchId(2), name: "NATAL" },
    Branch { id: BranchId(3), name: "SP1" },
    Branch { id: BranchId(4), name: "SP2" },
    Branch { id: BranchId(5), name: "RJ" },
];

/// Every role we know about, in display order.
pub static ROLES: &[Role] = &[
    Role { id: RoleId(1), name: "DESENVOLVEDOR" },
    Role { id: RoleId(2), name: "ADMINISTRADOR" },
    Role { id: RoleId(3), name: "GESTOR" },
    Role { id: RoleId(4), name: "ASSESSOR" },
    Role { id: RoleId(5), name: "OPERADOR" },
    Role { id: RoleId(6), name: "OPERADOR_JR" },
];

impl Branch {
    /// Display name for a branch
    pub fn name_of(id: BranchId) -> &'static str {
        BRANCHES
            .iter()
            .find(|branch| branch.id == id)
            .map_or("?", |branch| branch.name)
    }
}

impl Role {
    /// Display name for a role. The server may grant roles we don't have in
    /// our table, so this takes the raw ID.
    pub fn name_of(id: u32) -> Option<&'static str> {
        ROLES
            .iter()
            .find(|role| role.id.0 == id)
            .map(|role| role.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_listed_ids_can_be_constructed() {
        assert!(BranchId::new(5).is_some());
        assert!(BranchId::new(6).is_none());
        assert!(RoleId::new(6).is_some());
        assert!(RoleId::new(0).is_none());
    }

    #[test]
    fn ids_are_unique() {
        for (i, branch) in BRANCHES.iter().enumerate() {
            assert!(BRANCHES[i + 1..].iter().all(|other| other.id != branch.id));
        }

        for (i, role) in ROLES.iter().enumerate() {
            assert!(ROLES[i + 1..].iter().all(|other| other.id != role.id));
        }
    }

    #[test]
    fn names_match_table() {
        assert_eq!(Branch::name_of(BranchId(3)), "SP1");
        assert_eq!(Role::name_of(6), Some("OPERADOR_JR"));
        assert_eq!(Role::name_of(99), None);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&RoleId(4)).unwrap();

        assert_eq!(json, "4");
    }

    #[test]
    fn deserializing_unknown_id_fails() {
        assert!(serde_json::from_str::<BranchId>("2").is_ok());
        assert!(serde_json::from_str::<BranchId>("42").is_err());
    }
}
