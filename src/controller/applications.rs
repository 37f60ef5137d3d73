use std::str::FromStr;

use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use chrono::{DateTime, SubsecRound, Utc};

use serde::Deserialize;

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::{ApplicationUpdate, NewApplication};
use crate::repo::ApplicationRepo;

/// JSON body for creating a new draft
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicationBody {
    author: Uuid,
    activity: Option<String>,
    name: Option<String>,
    description: Option<String>,
    outline: Option<String>,
}

impl TryFrom<NewApplicationBody> for NewApplication {
    type Error = String;

    fn try_from(body: NewApplicationBody) -> Result<Self, Self::Error> {
        Ok(Self {
            author: body.author,
            activity: parse_optional(body.activity)?,
            name: parse_optional(body.name)?,
            description: parse_optional(body.description)?,
            outline: parse_optional(body.outline)?,
            // Stored with microsecond precision anyway
            created_at: Utc::now().trunc_subsecs(6),
            submitted_at: None,
        })
    }
}

/// JSON body for replacing the editable fields of a draft.
/// The application ID comes from the URL path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutApplicationBody {
    activity: Option<String>,
    name: Option<String>,
    description: Option<String>,
    outline: Option<String>,
}

impl PutApplicationBody {
    fn into_update(self, id: Uuid) -> Result<ApplicationUpdate, String> {
        Ok(ApplicationUpdate {
            id,
            activity: parse_optional(self.activity)?,
            name: parse_optional(self.name)?,
            description: parse_optional(self.description)?,
            outline: parse_optional(self.outline)?,
        })
    }
}

/// Listing filter, exactly one of the two must be set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    submitted_after: Option<DateTime<Utc>>,
    unsubmitted_after: Option<DateTime<Utc>>,
}

fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, String>
where
    T: FromStr<Err = String>,
{
    value.map(|v| v.parse()).transpose()
}

fn not_found(id: Uuid) -> RestError {
    RestError::NotFound(format!("No application with id {}", id))
}

fn already_submitted(id: Uuid) -> RestError {
    RestError::Conflict(format!("Application {} has already been submitted", id))
}

/// Create a new draft application
#[tracing::instrument(name = "Create a new application", skip(pool))]
#[post("")]
async fn create(
    pool: web::Data<PgPool>,
    body: web::Json<NewApplicationBody>,
) -> RestResult<impl Responder> {
    let pool = pool.get_ref();
    let new_application: NewApplication = body.0.try_into().map_err(RestError::ParseError)?;

    // A racing insert still trips the unique index and maps to a conflict
    if ApplicationRepo::user_draft_exists(pool, new_application.author).await? {
        return Err(RestError::Conflict(
            "Author already has a draft application".into(),
        ));
    }

    let application = ApplicationRepo::insert(pool, &new_application).await?;

    Ok(HttpResponse::Created().json(application))
}

/// List submitted applications or drafts, depending on the query filter
#[tracing::instrument(name = "List applications", skip(pool))]
#[get("")]
async fn list(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> RestResult<impl Responder> {
    let pool = pool.get_ref();

    let applications = match (query.submitted_after, query.unsubmitted_after) {
        (Some(since), None) => ApplicationRepo::fetch_submitted_since(pool, since).await?,
        (None, Some(after)) => ApplicationRepo::fetch_drafts_created_after(pool, after).await?,
        (Some(_), Some(_)) => {
            return Err(RestError::ParseError(
                "submittedAfter and unsubmittedAfter cannot be used together".into(),
            ))
        }
        (None, None) => {
            return Err(RestError::ParseError(
                "Either submittedAfter or unsubmittedAfter is required".into(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(applications))
}

#[tracing::instrument(name = "Fetch an application", skip(pool))]
#[get("/{id}")]
async fn fetch(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> RestResult<impl Responder> {
    let id = path.into_inner();

    let application = ApplicationRepo::fetch_by_id(pool.get_ref(), id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(application))
}

/// Replace the editable fields of a draft
#[tracing::instrument(name = "Edit a draft application", skip(pool))]
#[put("/{id}")]
async fn edit(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<PutApplicationBody>,
) -> RestResult<impl Responder> {
    let pool = pool.get_ref();
    let id = path.into_inner();
    let update = body.0.into_update(id).map_err(RestError::ParseError)?;

    if !ApplicationRepo::exists_by_id(pool, id).await? {
        return Err(not_found(id));
    }
    if ApplicationRepo::is_submitted(pool, id).await? {
        return Err(already_submitted(id));
    }

    // Submitted or deleted between the checks and the update
    let application = ApplicationRepo::update_draft(pool, &update)
        .await?
        .ok_or_else(|| already_submitted(id))?;

    Ok(HttpResponse::Ok().json(application))
}

#[tracing::instrument(name = "Delete a draft application", skip(pool))]
#[delete("/{id}")]
async fn remove(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> RestResult<impl Responder> {
    let pool = pool.get_ref();
    let id = path.into_inner();

    if !ApplicationRepo::exists_by_id(pool, id).await? {
        return Err(not_found(id));
    }
    if ApplicationRepo::is_submitted(pool, id).await? {
        return Err(already_submitted(id));
    }

    ApplicationRepo::delete_draft(pool, id).await?;

    Ok(HttpResponse::Ok())
}

/// Submit a complete draft for review. Submission is final.
#[tracing::instrument(name = "Submit an application", skip(pool))]
#[post("/{id}/submit")]
async fn submit(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> RestResult<impl Responder> {
    let id = path.into_inner();

    // Transaction context
    // The row stays locked from the checks until the submission is committed,
    // so concurrent submits and edits wait and then see the result
    {
        let mut tx = pool.begin().await?;

        let application = ApplicationRepo::fetch_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !application.is_draft() {
            return Err(already_submitted(id));
        }

        let missing = application.missing_required_fields();
        if !missing.is_empty() {
            return Err(RestError::ParseError(format!(
                "Application is missing required fields: {}",
                missing.join(", ")
            )));
        }

        ApplicationRepo::submit_by_id(&mut *tx, id).await?;

        tx.commit().await?;
    }

    Ok(HttpResponse::Ok())
}

/// Applications API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/applications")
        .service(create)
        .service(list)
        .service(fetch)
        .service(edit)
        .service(remove)
        .service(submit)
}
