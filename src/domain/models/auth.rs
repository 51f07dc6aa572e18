use serde::{Deserialize, Serialize};

/// Claims minted by the auth service this subsystem trusts. Issuance
/// and refresh live there; we only verify and read.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

/// The authenticated caller as every handler sees it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    /// Officers and admins may issue tokens and manage records;
    /// everyone else can only check in and read their own history.
    pub fn is_manager(&self) -> bool {
        self.role == "admin" || self.role == "officer"
    }
}
