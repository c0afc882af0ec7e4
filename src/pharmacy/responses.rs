use serde::Serialize;

use crate::models::pharmacies::PharmacyAccount;

#[derive(Serialize)]
pub struct PharmacyProfile {
    pub id: i32,
    pub pharmacy_name: String,
    pub email: String,
    pub city: Option<String>,
    pub operating_hours: Option<String>,
}

impl From<PharmacyAccount> for PharmacyProfile {
    fn from(account: PharmacyAccount) -> Self {
        Self {
            id: account.id,
            pharmacy_name: account.pharmacy_name,
            email: account.email,
            city: account.city,
            operating_hours: account.operating_hours,
        }
    }
}

#[derive(Serialize)]
pub struct AuthData {
    pub pharmacy: PharmacyProfile,
    pub token: String,
}
