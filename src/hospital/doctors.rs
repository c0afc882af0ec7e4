use diesel::prelude::*;

use crate::{
    database::patch::{ColumnKind, Patch, PatchColumn, PatchSchema},
    error::{ApiError, ApiResult},
    models::doctors::{DoctorData, NewDoctor},
    schema::doctors,
};

const NOT_FOUND: &str = "Doctor";

const MUTABLE_COLUMNS: &[PatchColumn] = &[
    PatchColumn::new("full_name", ColumnKind::Text, false),
    PatchColumn::new("specialization", ColumnKind::Text, false),
    PatchColumn::new("qualification", ColumnKind::Text, true),
    PatchColumn::new("experience_years", ColumnKind::Integer, true).non_negative(),
    PatchColumn::new("consultation_fee", ColumnKind::Double, true).non_negative(),
    PatchColumn::new("available_days", ColumnKind::Text, true),
    PatchColumn::new("available_time_start", ColumnKind::Time, true),
    PatchColumn::new("available_time_end", ColumnKind::Time, true),
    PatchColumn::new("is_available", ColumnKind::Bool, false),
];

pub const DOCTOR_PATCH: PatchSchema = PatchSchema {
    table: "doctors",
    owner_column: "hospital_id",
    columns: MUTABLE_COLUMNS,
};

pub fn insert(conn: &mut PgConnection, doctor: NewDoctor) -> ApiResult<DoctorData> {
    let doctor = diesel::insert_into(doctors::table)
        .values(&doctor)
        .returning(DoctorData::as_returning())
        .get_result(conn)?;
    Ok(doctor)
}

pub fn list_by_hospital(conn: &mut PgConnection, hospital_id: i32) -> ApiResult<Vec<DoctorData>> {
    let docs = doctors::table
        .filter(doctors::hospital_id.eq(hospital_id))
        .order(doctors::full_name.asc())
        .select(DoctorData::as_select())
        .load(conn)?;
    Ok(docs)
}

/// Locks the hospital's doctor row, then applies `patch` to it. A doctor of
/// another hospital is reported as missing.
pub fn update(
    conn: &mut PgConnection,
    hospital_id: i32,
    doctor_id: i32,
    patch: Patch,
) -> ApiResult<DoctorData> {
    conn.transaction::<_, ApiError, _>(|conn| {
        doctors::table
            .filter(doctors::id.eq(doctor_id))
            .filter(doctors::hospital_id.eq(hospital_id))
            .select(doctors::id)
            .for_update()
            .first::<i32>(conn)
            .optional()?
            .ok_or(ApiError::NotFound(NOT_FOUND))?;

        patch
            .execute::<DoctorData>(conn, doctor_id, hospital_id)?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    })
}

pub fn delete(conn: &mut PgConnection, hospital_id: i32, doctor_id: i32) -> ApiResult<()> {
    let res = diesel::delete(
        doctors::table
            .filter(doctors::id.eq(doctor_id))
            .filter(doctors::hospital_id.eq(hospital_id)),
    )
    .execute(conn)?;
    if res == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    Ok(())
}
