use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    models::{medicines::NewMedicine, pharmacies::NewPharmacy},
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub pharmacy_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub license_number: Option<String>,
    pub operating_hours: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if [&self.pharmacy_name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ApiError::bad_request("Please provide all required fields"));
        }
        Ok(())
    }

    pub fn into_new_pharmacy(self, password_hash: String) -> NewPharmacy {
        NewPharmacy {
            pharmacy_name: self.pharmacy_name,
            email: self.email,
            password_hash,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            license_number: self.license_number,
            operating_hours: self.operating_hours,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AddMedicineRequest {
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

impl AddMedicineRequest {
    pub fn into_new_medicine(self, pharmacy_id: i32) -> ApiResult<NewMedicine> {
        if self.medicine_name.trim().is_empty() {
            return Err(ApiError::bad_request("Medicine name and price are required"));
        }
        if self.price < 0.0 || self.stock_quantity.map_or(false, |qty| qty < 0) {
            return Err(ApiError::bad_request("Price and stock quantity cannot be negative"));
        }

        Ok(NewMedicine {
            pharmacy_id,
            medicine_name: self.medicine_name,
            generic_name: self.generic_name,
            manufacturer: self.manufacturer,
            category: self.category,
            dosage_form: self.dosage_form,
            strength: self.strength,
            price: self.price,
            stock_quantity: self.stock_quantity,
            expiry_date: self.expiry_date,
            requires_prescription: self.requires_prescription,
            is_available: self.is_available,
        })
    }
}
