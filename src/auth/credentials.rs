use super::{password, Identity, Role, TokenService};
use crate::{
    error::{ApiError, ApiResult},
    models::{hospitals::HospitalAccount, pharmacies::PharmacyAccount, users::UserAccount},
};

/// A stored account that can log in under one role.
pub trait Account {
    const ROLE: Role;

    fn id(&self) -> i32;

    fn password_hash(&self) -> &str;
}

impl Account for UserAccount {
    const ROLE: Role = Role::User;

    fn id(&self) -> i32 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl Account for HospitalAccount {
    const ROLE: Role = Role::Hospital;

    fn id(&self) -> i32 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl Account for PharmacyAccount {
    const ROLE: Role = Role::Pharmacy;

    fn id(&self) -> i32 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Checks a login attempt against the account found for the email, if any.
///
/// An unknown email and a wrong password fail identically, and both pay
/// for one hash verification.
pub fn check_login<A: Account>(account: Option<A>, raw_password: &str) -> ApiResult<A> {
    let verified = match &account {
        Some(account) => password::verify_password(raw_password, account.password_hash())?,
        None => {
            password::verify_decoy(raw_password);
            false
        }
    };

    match account {
        Some(account) if verified => Ok(account),
        _ => {
            tracing::debug!(role = %A::ROLE, "login rejected");
            Err(ApiError::InvalidCredentials)
        }
    }
}

/// Token scoped to the account's role.
pub fn session_token<A: Account>(tokens: &TokenService, account: &A) -> ApiResult<String> {
    let token = tokens.issue(account.id(), A::ROLE)?;
    tracing::debug!(role = %A::ROLE, subject_id = account.id(), "issued token");
    Ok(token)
}

impl Identity {
    /// Owner id for owner-scoped resources, checked against the expected role.
    pub fn owner_id(&self, role: Role) -> ApiResult<i32> {
        if self.role != role {
            return Err(ApiError::Forbidden);
        }
        Ok(self.subject_id)
    }
}
