use sqlx::PgExecutor;

use crate::model::ActivityType;

/// Read-only repository over the `activity_types` reference table
pub struct ActivityRepo;

impl ActivityRepo {
    #[tracing::instrument(name = "Fetch all activity types", skip(executor))]
    pub async fn fetch_all<'con>(
        executor: impl PgExecutor<'con>,
    ) -> sqlx::Result<Vec<ActivityType>> {
        let activities =
            sqlx::query_as::<_, ActivityType>("select activity, description from activity_types")
                .fetch_all(executor)
                .await?;

        Ok(activities)
    }
}
