use crate::schema::doctors;
use chrono::{NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, QueryableByName, Selectable, Serialize)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DoctorData {
    pub id: i32,
    pub hospital_id: i32,
    pub full_name: String,
    pub specialization: String,
    pub qualification: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub available_days: Option<String>,
    pub available_time_start: Option<NaiveTime>,
    pub available_time_end: Option<NaiveTime>,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// `None` for `is_available` lets the column default apply.
#[derive(Insertable)]
#[diesel(table_name = doctors)]
pub struct NewDoctor {
    pub hospital_id: i32,
    pub full_name: String,
    pub specialization: String,
    pub qualification: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub available_days: Option<String>,
    pub available_time_start: Option<NaiveTime>,
    pub available_time_end: Option<NaiveTime>,
    pub is_available: Option<bool>,
}
