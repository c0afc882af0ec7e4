mod accounts;
mod requests;
mod responses;
mod search;

use crate::{
    auth::{credentials, password, AccessGuard, Role, TokenService},
    database::{self, assert},
    error::ApiResult,
    protocol::ApiResponse,
    DbPool,
};
use actix_web::{web, HttpResponse};

use self::{
    requests::{LoginRequest, RegisterRequest, SearchDoctorRequest, SearchMedicineRequest},
    responses::AuthData,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::scope("/search")
                .wrap(AccessGuard::require(Role::User))
                .route("/doctors", web::get().to(search_doctors))
                .route("/medicines", web::get().to(search_medicines)),
        );
}

crate::handler_funcs! {
    register(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<RegisterRequest>),
    login(pool: web::Data<DbPool>, tokens: web::Data<TokenService>, info: web::Json<LoginRequest>),
    search_doctors(pool: web::Data<DbPool>, info: web::Query<SearchDoctorRequest>),
    search_medicines(pool: web::Data<DbPool>, info: web::Query<SearchMedicineRequest>),
}

async fn register_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();
    info.validate()?;

    let user = database::run(&pool, move |conn| {
        assert::assert_user_email_free(conn, &info.email)?;
        let password_hash = password::hash_password(&info.password)?;
        accounts::insert(conn, info.into_new_user(password_hash))
    })
    .await?;
    tracing::info!(user_id = user.id, "user registered");

    let token = credentials::session_token(&tokens, &user)?;
    let data = AuthData {
        user: user.into(),
        token,
    };
    Ok(HttpResponse::Created()
        .json(ApiResponse::ok(data).with_message("User registered successfully")))
}

async fn login_impl(
    pool: web::Data<DbPool>,
    tokens: web::Data<TokenService>,
    info: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();

    let user = database::run(&pool, move |conn| {
        let account = accounts::find_by_email(conn, &info.email)?;
        credentials::check_login(account, &info.password)
    })
    .await?;

    let token = credentials::session_token(&tokens, &user)?;
    let data = AuthData {
        user: user.into(),
        token,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data).with_message("Login successful")))
}

async fn search_doctors_impl(
    pool: web::Data<DbPool>,
    info: web::Query<SearchDoctorRequest>,
) -> ApiResult<HttpResponse> {
    let filters = info.into_inner().normalized();

    let docs = database::run(&pool, move |conn| search::search_doctors(conn, filters)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(docs)))
}

async fn search_medicines_impl(
    pool: web::Data<DbPool>,
    info: web::Query<SearchMedicineRequest>,
) -> ApiResult<HttpResponse> {
    let filters = info.into_inner().normalized();

    let meds = database::run(&pool, move |conn| search::search_medicines(conn, filters)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(meds)))
}
