use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, HttpResponse, Responder};

use sqlx::PgPool;

use crate::error::RestResult;
use crate::repo::ActivityRepo;

/// List every activity type an application can be filed under
#[tracing::instrument(name = "List activity types", skip(pool))]
#[get("")]
async fn list(pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let activities = ActivityRepo::fetch_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(activities))
}

/// Activity type API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/activities").service(list)
}
