mod accounts;
mod medicines;
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
    requests::{AddMedicineRequest, LoginRequest, RegisterRequest},
    responses::AuthData,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::scope("/medicines")
                .wrap(AccessGuard::require(Role::Pharmacy))
                .route("", web::post().to(add_medicine))
                .route("", web::get().to(list_medicines))
                .route("/{medicine_id}", web::put().to(update_medicine))
                .route("/{medicine_id}", web::delete().to(delete_medicine)),
        );
}

crate::handler_funcs! {
    register(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<RegisterRequest>),
    login(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<LoginRequest>),
    add_medicine(pool: web::Data<DbPool>, identity: web::ReqData<Identity>, info: web::Json<AddMedicineRequest>),
    list_medicines(pool: web::Data<DbPool>, identity: web::ReqData<Identity>),
    update_medicine(
        pool: web::Data<DbPool>,
        identity: web::ReqData<Identity>,
        medicine_id: web::Path<i32>,
        info: web::Json<Map<String, Value>>,
    ),
    delete_medicine(pool: web::Data<DbPool>, identity: web::ReqData<Identity>, medicine_id: web::Path<i32>),
}

async fn register_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();
    info.validate()?;

    let pharmacy = database::run(&pool, move |conn| {
        assert::assert_pharmacy_email_free(conn, &info.email)?;
        let password_hash = password::hash_password(&info.password)?;
        accounts::insert(conn, info.into_new_pharmacy(password_hash))
    })
    .await?;
    tracing::info!(pharmacy_id = pharmacy.id, "pharmacy registered");

    let token = credentials::session_token(&tokens, &pharmacy)?;
    let data = AuthData {
        pharmacy: pharmacy.into(),
        token,
    };
    Ok(HttpResponse::Created()
        .json(ApiResponse::ok(data).with_message("Pharmacy registered successfully")))
}

async fn login_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();

    let pharmacy = database::run(&pool, move |conn| {
        let account = accounts::find_by_email(conn, &info.email)?;
        credentials::check_login(account, &info.password)
    })
    .await?;

    let token = credentials::session_token(&tokens, &pharmacy)?;
    let data = AuthData {
        pharmacy: pharmacy.into(),
        token,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data).with_message("Login successful")))
}

async fn add_medicine_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    info: web::Json<AddMedicineRequest>,
) -> ApiResult<HttpResponse> {
    let pharmacy_id = identity.owner_id(Role::Pharmacy)?;
    let medicine = info.into_inner().into_new_medicine(pharmacy_id)?;

    let medicine = database::run(&pool, move |conn| medicines::insert(conn, medicine)).await?;

    Ok(HttpResponse::Created()
        .json(ApiResponse::ok(medicine).with_message("Medicine added successfully")))
}

async fn list_medicines_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
) -> ApiResult<HttpResponse> {
    let pharmacy_id = identity.owner_id(Role::Pharmacy)?;

    let meds = database::run(&pool, move |conn| medicines::list_by_pharmacy(conn, pharmacy_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(meds)))
}

async fn update_medicine_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    medicine_id: web::Path<i32>,
    info: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let pharmacy_id = identity.owner_id(Role::Pharmacy)?;
    let medicine_id = medicine_id.into_inner();
    let patch = medicines::MEDICINE_PATCH.build(&info)?;

    let medicine = database::run(&pool, move |conn| {
        medicines::update(conn, pharmacy_id, medicine_id, patch)
    })
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(medicine).with_message("Medicine updated successfully")))
}

async fn delete_medicine_impl(
    pool: web::Data<DbPool>,
    identity: web::ReqData<Identity>,
    medicine_id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let pharmacy_id = identity.owner_id(Role::Pharmacy)?;
    let medicine_id = medicine_id.into_inner();

    database::run(&pool, move |conn| medicines::delete(conn, pharmacy_id, medicine_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Medicine deleted successfully")))
}
