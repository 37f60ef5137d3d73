use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, HttpResponse, Responder};

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::repo::ApplicationRepo;

/// The draft an author is currently working on
#[tracing::instrument(name = "Fetch current draft of a user", skip(pool))]
#[get("/{author}/currentapplication")]
async fn current_application(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> RestResult<impl Responder> {
    let author = path.into_inner();

    let draft = ApplicationRepo::fetch_user_draft(pool.get_ref(), author)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("No draft application for user {}", author)))?;

    Ok(HttpResponse::Ok().json(draft))
}

/// User API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/users").service(current_application)
}
