//! Identity for the three account kinds: password hashing, signed tokens,
//! and the guard that checks them on protected routes.

pub mod credentials;
pub mod guard;
pub mod password;
pub mod token;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::{guard::AccessGuard, token::TokenService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Hospital,
    Pharmacy,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::Hospital => "hospital",
            Role::Pharmacy => "pharmacy",
        };
        f.write_str(name)
    }
}

/// The verified subject of a request, attached by [`AccessGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: i32,
    pub role: Role,
}
