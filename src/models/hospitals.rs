use crate::schema::hospitals;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = hospitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HospitalAccount {
    pub id: i32,
    pub hospital_name: String,
    pub email: String,
    pub password_hash: String,
    pub city: Option<String>,
    pub hospital_type: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = hospitals)]
pub struct NewHospital {
    pub hospital_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub registration_number: Option<String>,
    pub hospital_type: Option<String>,
}

/// Contact details shown next to a doctor in search results.
#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = hospitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HospitalContact {
    pub hospital_name: String,
    #[serde(rename = "hospital_phone")]
    pub phone: Option<String>,
    #[serde(rename = "hospital_address")]
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}
