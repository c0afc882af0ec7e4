diesel::table! {
    doctors (id) {
        id -> Int4,
        hospital_id -> Int4,
        full_name -> Varchar,
        specialization -> Varchar,
        qualification -> Nullable<Varchar>,
        experience_years -> Nullable<Int4>,
        consultation_fee -> Nullable<Float8>,
        available_days -> Nullable<Varchar>,
        available_time_start -> Nullable<Time>,
        available_time_end -> Nullable<Time>,
        is_available -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    hospitals (id) {
        id -> Int4,
        hospital_name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        phone -> Nullable<Varchar>,
        address -> Nullable<Text>,
        city -> Nullable<Varchar>,
        state -> Nullable<Varchar>,
        pincode -> Nullable<Varchar>,
        registration_number -> Nullable<Varchar>,
        hospital_type -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    medicines (id) {
        id -> Int4,
        pharmacy_id -> Int4,
        medicine_name -> Varchar,
        generic_name -> Nullable<Varchar>,
        manufacturer -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
        dosage_form -> Nullable<Varchar>,
        strength -> Nullable<Varchar>,
        price -> Float8,
        stock_quantity -> Int4,
        expiry_date -> Nullable<Date>,
        requires_prescription -> Bool,
        is_available -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    pharmacies (id) {
        id -> Int4,
        pharmacy_name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        phone -> Nullable<Varchar>,
        address -> Nullable<Text>,
        city -> Nullable<Varchar>,
        state -> Nullable<Varchar>,
        pincode -> Nullable<Varchar>,
        license_number -> Nullable<Varchar>,
        operating_hours -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        full_name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        phone -> Nullable<Varchar>,
        address -> Nullable<Text>,
        city -> Nullable<Varchar>,
        state -> Nullable<Varchar>,
        pincode -> Nullable<Varchar>,
        date_of_birth -> Nullable<Date>,
        gender -> Nullable<Varchar>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(doctors -> hospitals (hospital_id));
diesel::joinable!(medicines -> pharmacies (pharmacy_id));

diesel::allow_tables_to_appear_in_same_query!(doctors, hospitals, medicines, pharmacies, users,);
