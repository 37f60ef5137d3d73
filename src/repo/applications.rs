use chrono::{DateTime, Utc};

use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{Application, ApplicationUpdate, NewApplication};

const APPLICATION_COLUMNS: &str =
    "id, author, activity, name, description, outline, created_at, submitted_at";

/// Repository for interfacing with the `applications` table
///
/// Every operation runs a single statement on whatever executor it is given,
/// so a pool connection is only held for that statement.
pub struct ApplicationRepo;

impl ApplicationRepo {
    #[tracing::instrument(name = "Fetch application by id", skip(executor))]
    pub async fn fetch_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<Application>> {
        let sql = format!("select {APPLICATION_COLUMNS} from applications where id = $1");
        let maybe_application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(maybe_application)
    }

    /// Fetch and row-lock an application until the surrounding transaction ends.
    /// Concurrent writers to the same row wait for the lock.
    #[tracing::instrument(name = "Fetch application by id for update", skip(executor))]
    pub async fn fetch_by_id_for_update<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<Application>> {
        let sql =
            format!("select {APPLICATION_COLUMNS} from applications where id = $1 for update");
        let maybe_application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(maybe_application)
    }

    #[tracing::instrument(name = "Insert application", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_application: &NewApplication,
    ) -> sqlx::Result<Application> {
        let sql = format!(
            "insert into applications
                (author, activity, name, description, outline, created_at, submitted_at)
            values ($1, $2, $3, $4, $5, $6, $7)
            returning {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(new_application.author)
            .bind(new_application.activity.as_ref().map(AsRef::<str>::as_ref))
            .bind(new_application.name.as_ref().map(AsRef::<str>::as_ref))
            .bind(new_application.description.as_ref().map(AsRef::<str>::as_ref))
            .bind(new_application.outline.as_ref().map(AsRef::<str>::as_ref))
            .bind(new_application.created_at)
            .bind(new_application.submitted_at)
            .fetch_one(executor)
            .await?;

        Ok(application)
    }

    /// Overwrite the editable fields of a draft.
    /// Returns `None` when there is no draft with the given id.
    #[tracing::instrument(name = "Update draft application", skip(executor))]
    pub async fn update_draft<'con>(
        executor: impl PgExecutor<'con>,
        update: &ApplicationUpdate,
    ) -> sqlx::Result<Option<Application>> {
        let sql = format!(
            "update applications
            set activity = $2, name = $3, description = $4, outline = $5
            where id = $1 and submitted_at is null
            returning {APPLICATION_COLUMNS}"
        );
        let maybe_application = sqlx::query_as::<_, Application>(&sql)
            .bind(update.id)
            .bind(update.activity.as_ref().map(AsRef::<str>::as_ref))
            .bind(update.name.as_ref().map(AsRef::<str>::as_ref))
            .bind(update.description.as_ref().map(AsRef::<str>::as_ref))
            .bind(update.outline.as_ref().map(AsRef::<str>::as_ref))
            .fetch_optional(executor)
            .await?;

        Ok(maybe_application)
    }

    /// Delete a draft. Submitted or unknown applications are left alone.
    #[tracing::instrument(name = "Delete draft application", skip(executor))]
    pub async fn delete_draft<'con>(executor: impl PgExecutor<'con>, id: Uuid) -> sqlx::Result<()> {
        sqlx::query("delete from applications where id = $1 and submitted_at is null")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Stamp the application as submitted now.
    /// NOTE: Not guarded, an already submitted application gets a fresh timestamp
    #[tracing::instrument(name = "Submit application by id", skip(executor))]
    pub async fn submit_by_id<'con>(executor: impl PgExecutor<'con>, id: Uuid) -> sqlx::Result<()> {
        let submitted_at = Utc::now();
        sqlx::query("update applications set submitted_at = $2 where id = $1")
            .bind(id)
            .bind(submitted_at)
            .execute(executor)
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Fetch applications submitted since", skip(executor))]
    pub async fn fetch_submitted_since<'con>(
        executor: impl PgExecutor<'con>,
        since: DateTime<Utc>,
    ) -> sqlx::Result<Vec<Application>> {
        let sql =
            format!("select {APPLICATION_COLUMNS} from applications where submitted_at >= $1");
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(since)
            .fetch_all(executor)
            .await?;

        Ok(applications)
    }

    #[tracing::instrument(name = "Fetch drafts created after", skip(executor))]
    pub async fn fetch_drafts_created_after<'con>(
        executor: impl PgExecutor<'con>,
        after: DateTime<Utc>,
    ) -> sqlx::Result<Vec<Application>> {
        let sql = format!(
            "select {APPLICATION_COLUMNS} from applications
            where created_at > $1 and submitted_at is null"
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(after)
            .fetch_all(executor)
            .await?;

        Ok(applications)
    }

    #[tracing::instrument(name = "Fetch draft of author", skip(executor))]
    pub async fn fetch_user_draft<'con>(
        executor: impl PgExecutor<'con>,
        author: Uuid,
    ) -> sqlx::Result<Option<Application>> {
        let sql = format!(
            "select {APPLICATION_COLUMNS} from applications
            where author = $1 and submitted_at is null"
        );
        let maybe_application = sqlx::query_as::<_, Application>(&sql)
            .bind(author)
            .fetch_optional(executor)
            .await?;

        Ok(maybe_application)
    }

    #[tracing::instrument(name = "Check application exists", skip(executor))]
    pub async fn exists_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>("select exists(select 1 from applications where id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    #[tracing::instrument(name = "Check author has a draft", skip(executor))]
    pub async fn user_draft_exists<'con>(
        executor: impl PgExecutor<'con>,
        author: Uuid,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "select exists(select 1 from applications where author = $1 and submitted_at is null)",
        )
        .bind(author)
        .fetch_one(executor)
        .await
    }

    #[tracing::instrument(name = "Check application is submitted", skip(executor))]
    pub async fn is_submitted<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "select exists(select 1 from applications where id = $1 and submitted_at is not null)",
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }
}
