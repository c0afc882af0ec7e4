use diesel::prelude::*;

use crate::{
    database::assert,
    error::ApiResult,
    models::hospitals::{HospitalAccount, NewHospital},
};

pub fn find_by_email(conn: &mut PgConnection, email: &str) -> ApiResult<Option<HospitalAccount>> {
    use crate::schema::hospitals;

    let account = hospitals::table
        .filter(hospitals::email.eq(email))
        .select(HospitalAccount::as_select())
        .first(conn)
        .optional()?;
    Ok(account)
}

pub fn insert(conn: &mut PgConnection, hospital: NewHospital) -> ApiResult<HospitalAccount> {
    use crate::schema::hospitals;

    diesel::insert_into(hospitals::table)
        .values(&hospital)
        .returning(HospitalAccount::as_returning())
        .get_result(conn)
        .map_err(|err| assert::conflict_on_duplicate(err, assert::HOSPITAL_EXISTS))
}
