use crate::schema::pharmacies;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = pharmacies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PharmacyAccount {
    pub id: i32,
    pub pharmacy_name: String,
    pub email: String,
    pub password_hash: String,
    pub city: Option<String>,
    pub operating_hours: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = pharmacies)]
pub struct NewPharmacy {
    pub pharmacy_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub license_number: Option<String>,
    pub operating_hours: Option<String>,
}

/// Contact details shown next to a medicine in search results.
#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = pharmacies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PharmacyContact {
    pub pharmacy_name: String,
    #[serde(rename = "pharmacy_phone")]
    pub phone: Option<String>,
    #[serde(rename = "pharmacy_address")]
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub operating_hours: Option<String>,
}
