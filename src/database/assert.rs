use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use crate::error::{ApiError, ApiResult};

pub const USER_EXISTS: &str = "User already exists with this email";
pub const HOSPITAL_EXISTS: &str = "Hospital already registered with this email";
pub const PHARMACY_EXISTS: &str = "Pharmacy already registered with this email";

pub fn assert_user_email_free(conn: &mut PgConnection, email: &str) -> ApiResult<()> {
    use crate::schema::users;

    let res = users::table
        .filter(users::email.eq(email))
        .count()
        .get_result::<i64>(conn)?;
    if res > 0 {
        return Err(ApiError::Conflict(USER_EXISTS.to_string()));
    }

    Ok(())
}

pub fn assert_hospital_email_free(conn: &mut PgConnection, email: &str) -> ApiResult<()> {
    use crate::schema::hospitals;

    let res = hospitals::table
        .filter(hospitals::email.eq(email))
        .count()
        .get_result::<i64>(conn)?;
    if res > 0 {
        return Err(ApiError::Conflict(HOSPITAL_EXISTS.to_string()));
    }

    Ok(())
}

pub fn assert_pharmacy_email_free(conn: &mut PgConnection, email: &str) -> ApiResult<()> {
    use crate::schema::pharmacies;

    let res = pharmacies::table
        .filter(pharmacies::email.eq(email))
        .count()
        .get_result::<i64>(conn)?;
    if res > 0 {
        return Err(ApiError::Conflict(PHARMACY_EXISTS.to_string()));
    }

    Ok(())
}

/// A duplicate insert that lost the race against the email check still
/// reports a conflict rather than a server error.
pub fn conflict_on_duplicate(err: DieselError, message: &str) -> ApiError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApiError::Conflict(message.to_string())
        }
        err => err.into(),
    }
}
