use diesel::prelude::*;

use crate::{
    database::assert,
    error::ApiResult,
    models::users::{NewUser, UserAccount},
};

pub fn find_by_email(conn: &mut PgConnection, email: &str) -> ApiResult<Option<UserAccount>> {
    use crate::schema::users;

    let account = users::table
        .filter(users::email.eq(email))
        .select(UserAccount::as_select())
        .first(conn)
        .optional()?;
    Ok(account)
}

pub fn insert(conn: &mut PgConnection, user: NewUser) -> ApiResult<UserAccount> {
    use crate::schema::users;

    diesel::insert_into(users::table)
        .values(&user)
        .returning(UserAccount::as_returning())
        .get_result(conn)
        .map_err(|err| assert::conflict_on_duplicate(err, assert::USER_EXISTS))
}
