use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    models::users::NewUser,
    utils::non_blank,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if [&self.full_name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ApiError::bad_request("Please provide all required fields"));
        }
        Ok(())
    }

    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            full_name: self.full_name,
            email: self.email,
            password_hash,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Default, Deserialize)]
pub struct SearchDoctorRequest {
    pub specialization: Option<String>,
    pub city: Option<String>,
    pub hospital_name: Option<String>,
}

impl SearchDoctorRequest {
    pub fn normalized(self) -> Self {
        Self {
            specialization: non_blank(self.specialization),
            city: non_blank(self.city),
            hospital_name: non_blank(self.hospital_name),
        }
    }
}

#[derive(Default, Deserialize)]
pub struct SearchMedicineRequest {
    pub medicine_name: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

impl SearchMedicineRequest {
    pub fn normalized(self) -> Self {
        Self {
            medicine_name: non_blank(self.medicine_name),
            city: non_blank(self.city),
            category: non_blank(self.category),
        }
    }
}
