use diesel::prelude::*;

use crate::{
    database::patch::{ColumnKind, Patch, PatchColumn, PatchSchema},
    error::{ApiError, ApiResult},
    models::medicines::{MedicineData, NewMedicine},
    schema::medicines,
};

const NOT_FOUND: &str = "Medicine";

const MUTABLE_COLUMNS: &[PatchColumn] = &[
    PatchColumn::new("medicine_name", ColumnKind::Text, false),
    PatchColumn::new("generic_name", ColumnKind::Text, true),
    PatchColumn::new("manufacturer", ColumnKind::Text, true),
    PatchColumn::new("category", ColumnKind::Text, true),
    PatchColumn::new("dosage_form", ColumnKind::Text, true),
    PatchColumn::new("strength", ColumnKind::Text, true),
    PatchColumn::new("price", ColumnKind::Double, false).non_negative(),
    PatchColumn::new("stock_quantity", ColumnKind::Integer, false).non_negative(),
    PatchColumn::new("expiry_date", ColumnKind::Date, true),
    PatchColumn::new("requires_prescription", ColumnKind::Bool, false),
    PatchColumn::new("is_available", ColumnKind::Bool, false),
];

pub const MEDICINE_PATCH: PatchSchema = PatchSchema {
    table: "medicines",
    owner_column: "pharmacy_id",
    columns: MUTABLE_COLUMNS,
};

pub fn insert(conn: &mut PgConnection, medicine: NewMedicine) -> ApiResult<MedicineData> {
    let medicine = diesel::insert_into(medicines::table)
        .values(&medicine)
        .returning(MedicineData::as_returning())
        .get_result(conn)?;
    Ok(medicine)
}

pub fn list_by_pharmacy(conn: &mut PgConnection, pharmacy_id: i32) -> ApiResult<Vec<MedicineData>> {
    let meds = medicines::table
        .filter(medicines::pharmacy_id.eq(pharmacy_id))
        .order(medicines::medicine_name.asc())
        .select(MedicineData::as_select())
        .load(conn)?;
    Ok(meds)
}

/// Locks the pharmacy's medicine row, then applies `patch` to it. A medicine
/// of another pharmacy is reported as missing.
pub fn update(
    conn: &mut PgConnection,
    pharmacy_id: i32,
    medicine_id: i32,
    patch: Patch,
) -> ApiResult<MedicineData> {
    conn.transaction::<_, ApiError, _>(|conn| {
        medicines::table
            .filter(medicines::id.eq(medicine_id))
            .filter(medicines::pharmacy_id.eq(pharmacy_id))
            .select(medicines::id)
            .for_update()
            .first::<i32>(conn)
            .optional()?
            .ok_or(ApiError::NotFound(NOT_FOUND))?;

        patch
            .execute::<MedicineData>(conn, medicine_id, pharmacy_id)?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    })
}

pub fn delete(conn: &mut PgConnection, pharmacy_id: i32, medicine_id: i32) -> ApiResult<()> {
    let res = diesel::delete(
        medicines::table
            .filter(medicines::id.eq(medicine_id))
            .filter(medicines::pharmacy_id.eq(pharmacy_id)),
    )
    .execute(conn)?;
    if res == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    Ok(())
}
