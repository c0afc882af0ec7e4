use chrono::NaiveTime;
use serde::Deserialize;

use crate::{
    database::patch::parse_time,
    error::{ApiError, ApiResult},
    models::{doctors::NewDoctor, hospitals::NewHospital},
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub hospital_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub registration_number: Option<String>,
    pub hospital_type: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if [&self.hospital_name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ApiError::bad_request("Please provide all required fields"));
        }
        Ok(())
    }

    pub fn into_new_hospital(self, password_hash: String) -> NewHospital {
        NewHospital {
            hospital_name: self.hospital_name,
            email: self.email,
            password_hash,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            registration_number: self.registration_number,
            hospital_type: self.hospital_type,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AddDoctorRequest {
    pub full_name: String,
    pub specialization: String,
    pub qualification: Option<String>,
    pub experience_years: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub available_days: Option<String>,
    pub available_time_start: Option<String>,
    pub available_time_end: Option<String>,
    pub is_available: Option<bool>,
}

impl AddDoctorRequest {
    pub fn into_new_doctor(self, hospital_id: i32) -> ApiResult<NewDoctor> {
        if self.full_name.trim().is_empty() || self.specialization.trim().is_empty() {
            return Err(ApiError::bad_request(
                "Doctor name and specialization are required",
            ));
        }
        if self.consultation_fee.map_or(false, |fee| fee < 0.0)
            || self.experience_years.map_or(false, |years| years < 0)
        {
            return Err(ApiError::bad_request(
                "Consultation fee and experience cannot be negative",
            ));
        }

        Ok(NewDoctor {
            hospital_id,
            available_time_start: optional_time("available_time_start", self.available_time_start)?,
            available_time_end: optional_time("available_time_end", self.available_time_end)?,
            full_name: self.full_name,
            specialization: self.specialization,
            qualification: self.qualification,
            experience_years: self.experience_years,
            consultation_fee: self.consultation_fee,
            available_days: self.available_days,
            is_available: self.is_available,
        })
    }
}

fn optional_time(field: &str, value: Option<String>) -> ApiResult<Option<NaiveTime>> {
    match value {
        Some(s) => parse_time(&s)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid value for '{}'", field))),
        None => Ok(None),
    }
}
