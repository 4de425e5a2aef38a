use crate::reference::{BranchId, RoleId};
use crate::RegistrationDraft;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Debug, Formatter};

/// The request to register a new user. Optional fields are always sent,
/// as `null` when absent, since the API may treat a missing key differently.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Req {
    pub nome_completo: String,
    pub codigo_a: Option<String>,
    pub email: String,
    pub password: String,
    pub roles_list: Vec<RoleId>,
    pub filial_id: Option<BranchId>,
}

impl From<&RegistrationDraft> for Req {
    fn from(draft: &RegistrationDraft) -> Self {
        Self {
            nome_completo: draft.full_name().to_owned(),
            codigo_a: draft.employee_code().map(ToOwned::to_owned),
            email: draft.email().to_owned(),
            password: draft.password().to_owned(),
            roles_list: draft.roles().iter().copied().collect(),
            filial_id: draft.branch(),
        }
    }
}

impl Debug for Req {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Req")
            .field("nome_completo", &self.nome_completo)
            .field("codigo_a", &self.codigo_a)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("roles_list", &self.roles_list)
            .field("filial_id", &self.filial_id)
            .finish()
    }
}

/// The server's confirmation that a user was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    pub id: i64,

    /// The login the server assigned. Users don't pick their own.
    pub login: String,

    /// Roles actually granted. These are raw IDs since the server may know
    /// about roles we don't.
    pub roles: Vec<u32>,

    #[serde(rename = "createdAt", deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Accept RFC 3339 timestamps, and also naive ones (which we take to be UTC)
/// since plenty of backends leave the offset off.
fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        })
        .map_err(serde::de::Error::custom)
}

/// The body of a rejected request. Everything is optional; we make do with
/// whatever the server gives us.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResp {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResp {
    /// Pull a human-readable message out of `detail`. Plain strings are used
    /// as-is. Validation failures come as a list of objects with a `msg`
    /// field, which we join together.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();

                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
