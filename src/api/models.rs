use serde::{Deserialize, Serialize};

/// A credential record as the user service stores it.
///
/// Field names are capitalized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of a delete request.
#[derive(Debug, Serialize)]
pub struct UsernameBody<'a> {
    #[serde(rename = "Username")]
    pub username: &'a str,
}

/// `{ "message": ... }` envelope used by every mutating endpoint, success or not.
#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}
