use diesel::prelude::*;

use crate::{
    database::assert,
    error::ApiResult,
    models::pharmacies::{NewPharmacy, PharmacyAccount},
};

pub fn find_by_email(conn: &mut PgConnection, email: &str) -> ApiResult<Option<PharmacyAccount>> {
    use crate::schema::pharmacies;

    let account = pharmacies::table
        .filter(pharmacies::email.eq(email))
        .select(PharmacyAccount::as_select())
        .first(conn)
        .optional()?;
    Ok(account)
}

pub fn insert(conn: &mut PgConnection, pharmacy: NewPharmacy) -> ApiResult<PharmacyAccount> {
    use crate::schema::pharmacies;

    diesel::insert_into(pharmacies::table)
        .values(&pharmacy)
        .returning(PharmacyAccount::as_returning())
        .get_result(conn)
        .map_err(|err| assert::conflict_on_duplicate(err, assert::PHARMACY_EXISTS))
}
