use serde::Serialize;

use crate::models::hospitals::HospitalAccount;

#[derive(Serialize)]
pub struct HospitalProfile {
    pub id: i32,
    pub hospital_name: String,
    pub email: String,
    pub city: Option<String>,
    pub hospital_type: Option<String>,
}

impl From<HospitalAccount> for HospitalProfile {
    fn from(account: HospitalAccount) -> Self {
        Self {
            id: account.id,
            hospital_name: account.hospital_name,
            email: account.email,
            city: account.city,
            hospital_type: account.hospital_type,
        }
    }
}

#[derive(Serialize)]
pub struct AuthData {
    pub hospital: HospitalProfile,
    pub token: String,
}
