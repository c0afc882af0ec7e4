pub mod assert;
pub mod patch;

use crate::{error::ApiResult, DbPool};
use actix_web::web;
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::PooledConnection;

pub fn get_db_conn(
    pool: &DbPool,
) -> anyhow::Result<PooledConnection<ConnectionManager<PgConnection>>> {
    pool.get().context("DB connection")
}

/// Runs blocking diesel work on the actix blocking pool with a pooled connection.
pub async fn run<F, T>(pool: &web::Data<DbPool>, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut PgConnection) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    web::block(move || {
        let mut conn = get_db_conn(&pool)?;
        f(&mut conn)
    })
    .await
    .context("DB error")?
}
