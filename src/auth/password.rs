use std::sync::OnceLock;

use anyhow::Context;

use crate::error::ApiResult;

/// bcrypt work factor for stored password hashes.
pub const PASSWORD_COST: u32 = 10;

pub fn hash_password(password: &str) -> ApiResult<String> {
    let hash = bcrypt::hash(password, PASSWORD_COST).context("hashing password")?;
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let matches = bcrypt::verify(password, hash).context("verifying password hash")?;
    Ok(matches)
}

/// Hash checked when a login names no account, so both failures cost one
/// bcrypt verification.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| bcrypt::hash("medlink-decoy", PASSWORD_COST).unwrap_or_default())
}

pub fn verify_decoy(password: &str) {
    let _ = bcrypt::verify(password, decoy_hash());
}
