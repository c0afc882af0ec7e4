use crate::schema::medicines;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, QueryableByName, Selectable, Serialize)]
#[diesel(table_name = medicines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MedicineData {
    pub id: i32,
    pub pharmacy_id: i32,
    pub medicine_name: String,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub expiry_date: Option<NaiveDate>,
    pub requires_prescription: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = medicines)]
pub struct NewMedicine {
    pub pharmacy_id: i32,
    pub medicine_name: String,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub price: f64,
    pub stock_quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub requires_prescription: Option<bool>,
    pub is_available: Option<bool>,
}
