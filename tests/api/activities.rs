use reqwest::StatusCode;

use serde::Deserialize;

use sqlx::PgPool;

use crate::helpers::TestApp;

#[derive(Debug, Deserialize)]
struct Activity {
    activity: String,
    description: String,
}

#[sqlx::test]
async fn list_returns_seeded_activities(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app.activities_list().await.expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let activities: Vec<Activity> = res.json().await.expect("Failed to decode activities");
    let mut names: Vec<_> = activities.iter().map(|a| a.activity.as_str()).collect();
    names.sort();

    assert_eq!(vec!["Discussion", "Masterclass", "Report"], names);
    assert!(activities.iter().all(|a| !a.description.is_empty()));

    Ok(())
}

#[sqlx::test]
async fn list_returns_empty_array_without_activities(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    sqlx::query("delete from activity_types")
        .execute(&pool)
        .await?;

    let res = app.activities_list().await.expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let activities: Vec<Activity> = res.json().await.expect("Failed to decode activities");
    assert!(activities.is_empty());

    Ok(())
}

#[sqlx::test]
async fn list_includes_activities_with_spaces(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    sqlx::query("insert into activity_types(activity, description) values ($1, $2)")
        .bind("Lightning Talk")
        .bind("5 minutes")
        .execute(&pool)
        .await?;

    let res = app.activities_list().await.expect("Failed to execute request");
    let activities: Vec<Activity> = res.json().await.expect("Failed to decode activities");

    assert!(activities.iter().any(|a| a.activity == "Lightning Talk"));

    Ok(())
}
