mod accounts;
mod doctors;
mod requests;
mod responses;

use crate::{
    auth::{credentials, password, AccessGuard, Identity, Role, TokenService},
    database::{self, assert},
    error::ApiResult,
    protocol::ApiResponse,
    DbPool,
};
use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use self::{
    requests::{AddDoctorRequest, LoginRequest, RegisterRequest},
    responses::AuthData,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::scope("/doctors")
                .wrap(AccessGuard::require(Role::Hospital))
                .route("", web::post().to(add_doctor))
                .route("", web::get().to(list_doctors))
                .route("/{doctor_id}", web::put().to(update_doctor))
                .route("/{doctor_id}", web::delete().to(delete_doctor)),
        );
}

crate::handler_funcs! {
    register(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<RegisterRequest>),
    login(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<LoginRequest>),
    add_doctor(pool: web::Data<DbPool>, identity: web::ReqData<Identity>, info: web::Json<AddDoctorRequest>),
    list_doctors(pool: web::Data<DbPool>, identity: web::ReqData<Identity>),
    update_doctor(
        pool: web::Data<DbPool>,
        identity: web::ReqData<Identity>,
        doctor_id: web::Path<i32>,
        info: web::Json<Map<String, Value>>,
    ),
    delete_doctor(pool: web::Data<DbPool>, identity: web::ReqData<Identity>, doctor_id: web::Path<i32>),
}

async fn register_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();
    info.validate()?;

    let hospital = database::run(&pool, move |conn| {
        assert::assert_hospital_email_free(conn, &info.email)?;
        let password_hash = password::hash_password(&info.password)?;
        accounts::insert(conn, info.into_new_hospital(password_hash))
    })
    .await?;
    tracing::info!(hospital_id = hospital.id, "hospital registered");

    let token = credentials::session_token(&tokens, &hospital)?;
    let data = AuthData {
        hospital: hospital.into(),
        token,
    };
    Ok(HttpResponse::Created()
        .json(ApiResponse::ok(data).with_message("Hospital registered successfully")))
}

async fn login_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();

    let hospital = database::run(&pool, move |conn| {
        let account = accounts::find_by_email(conn, &info.email)?;
        credentials::check_login(account, &info.password)
    })
    .await?;

    let token = credentials::session_token(&tokens, &hospital)?;
    let data = AuthData {
        hospital: hospital.into(),
        token,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data).with_message("Login successful")))
}

async fn add_doctor_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    info: web::Json<AddDoctorRequest>,
) -> ApiResult<HttpResponse> {
    let hospital_id = identity.owner_id(Role::Hospital)?;
    let doctor = info.into_inner().into_new_doctor(hospital_id)?;

    let doctor = database::run(&pool, move |conn| doctors::insert(conn, doctor)).await?;

    Ok(HttpResponse::Created()
        .json(ApiResponse::ok(doctor).with_message("Doctor added successfully")))
}

async fn list_doctors_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
) -> ApiResult<HttpResponse> {
    let hospital_id = identity.owner_id(Role::Hospital)?;

    let docs = database::run(&pool, move |conn| doctors::list_by_hospital(conn, hospital_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(docs)))
}

async fn update_doctor_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    doctor_id: web::Path<i32>,
    info: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let hospital_id = identity.owner_id(Role::Hospital)?;
    let doctor_id = doctor_id.into_inner();
    let patch = doctors::DOCTOR_PATCH.build(&info)?;

    let doctor = database::run(&pool, move |conn| {
        doctors::update(conn, hospital_id, doctor_id, patch)
    })
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(doctor).with_message("Doctor updated successfully")))
}

async fn delete_doctor_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    doctor_id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let hospital_id = identity.owner_id(Role::Hospital)?;
    let doctor_id = doctor_id.into_inner();

    database::run(&pool, move |conn| doctors::delete(conn, hospital_id, doctor_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Doctor deleted successfully")))
}
