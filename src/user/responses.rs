use serde::Serialize;

use crate::models::{
    doctors::DoctorData,
    hospitals::HospitalContact,
    medicines::MedicineData,
    pharmacies::PharmacyContact,
    users::UserAccount,
};

#[derive(Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
}

impl From<UserAccount> for UserProfile {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            email: account.email,
            phone: account.phone,
            city: account.city,
        }
    }
}

#[derive(Serialize)]
pub struct AuthData {
    pub user: UserProfile,
    pub token: String,
}

/// A doctor row with its hospital's contact details alongside.
#[derive(Serialize)]
pub struct SearchDoctorItem {
    #[serde(flatten)]
    pub doctor: DoctorData,
    #[serde(flatten)]
    pub hospital: HospitalContact,
}

/// A medicine row with its pharmacy's contact details alongside.
#[derive(Serialize)]
pub struct SearchMedicineItem {
    #[serde(flatten)]
    pub medicine: MedicineData,
    #[serde(flatten)]
    pub pharmacy: PharmacyContact,
}
