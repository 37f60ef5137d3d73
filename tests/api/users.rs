use reqwest::StatusCode;

use sqlx::PgPool;

use uuid::Uuid;

use crate::helpers::{Application, NewApplication, TestApp};

#[sqlx::test]
async fn current_application_returns_draft(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let author = Uuid::new_v4();
    let created = app.create_application(&NewApplication::complete(author)).await;

    let res = app
        .user_current_application(author)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let draft: Application = res.json().await.expect("Failed to decode application");
    assert_eq!(created, draft);

    Ok(())
}

#[sqlx::test]
async fn current_application_is_not_found_after_submit(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let author = Uuid::new_v4();
    let created = app.create_application(&NewApplication::complete(author)).await;

    app.application_submit(created.id)
        .await
        .expect("Failed to execute request");

    let res = app
        .user_current_application(author)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test]
async fn current_application_is_not_found_for_unknown_user(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .user_current_application(Uuid::new_v4())
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}
