pub mod doctors;
pub mod hospitals;
pub mod medicines;
pub mod pharmacies;
pub mod users;
