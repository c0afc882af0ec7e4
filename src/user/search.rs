use diesel::prelude::*;

use super::{
    requests::{SearchDoctorRequest, SearchMedicineRequest},
    responses::{SearchDoctorItem, SearchMedicineItem},
};
use crate::{
    error::ApiResult,
    models::{
        doctors::DoctorData, hospitals::HospitalContact, medicines::MedicineData,
        pharmacies::PharmacyContact,
    },
    schema::{doctors, hospitals, medicines, pharmacies},
    utils::get_str_pattern,
};

/// Available doctors of active hospitals, narrowed by every filter present.
pub fn search_doctors(
    conn: &mut PgConnection,
    filters: SearchDoctorRequest,
) -> ApiResult<Vec<SearchDoctorItem>> {
    let mut query = doctors::table
        .inner_join(hospitals::table)
        .filter(doctors::is_available.eq(true))
        .filter(hospitals::is_active.eq(true))
        .select((DoctorData::as_select(), HospitalContact::as_select()))
        .order(doctors::full_name.asc())
        .into_boxed();

    if let Some(specialization) = filters.specialization {
        query = query.filter(doctors::specialization.ilike(get_str_pattern(specialization)));
    }
    if let Some(city) = filters.city {
        query = query.filter(hospitals::city.ilike(get_str_pattern(city)));
    }
    if let Some(hospital_name) = filters.hospital_name {
        query = query.filter(hospitals::hospital_name.ilike(get_str_pattern(hospital_name)));
    }

    let docs = query
        .load::<(DoctorData, HospitalContact)>(conn)?
        .into_iter()
        .map(|(doctor, hospital)| SearchDoctorItem { doctor, hospital })
        .collect();
    Ok(docs)
}

/// In-stock, available medicines of active pharmacies. The name filter
/// matches either the brand or the generic name.
pub fn search_medicines(
    conn: &mut PgConnection,
    filters: SearchMedicineRequest,
) -> ApiResult<Vec<SearchMedicineItem>> {
    let mut query = medicines::table
        .inner_join(pharmacies::table)
        .filter(medicines::is_available.eq(true))
        .filter(medicines::stock_quantity.gt(0))
        .filter(pharmacies::is_active.eq(true))
        .select((MedicineData::as_select(), PharmacyContact::as_select()))
        .order(medicines::medicine_name.asc())
        .into_boxed();

    if let Some(name) = filters.medicine_name {
        let pattern = get_str_pattern(name);
        query = query.filter(
            medicines::medicine_name
                .ilike(pattern.clone())
                .or(medicines::generic_name.ilike(pattern)),
        );
    }
    if let Some(city) = filters.city {
        query = query.filter(pharmacies::city.ilike(get_str_pattern(city)));
    }
    if let Some(category) = filters.category {
        query = query.filter(medicines::category.ilike(get_str_pattern(category)));
    }

    let meds = query
        .load::<(MedicineData, PharmacyContact)>(conn)?
        .into_iter()
        .map(|(medicine, pharmacy)| SearchMedicineItem { medicine, pharmacy })
        .collect();
    Ok(meds)
}
