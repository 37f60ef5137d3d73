use std::net::TcpListener;

use chrono::{DateTime, SecondsFormat, Utc};

use reqwest::{Client, Method, Response};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use uuid::Uuid;

use cfp_service::app;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub author: Option<Uuid>,
    pub activity: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
}

impl NewApplication {
    /// A draft that has everything needed for submission
    pub fn complete(author: Uuid) -> Self {
        Self {
            author: Some(author),
            activity: Some("Report".into()),
            name: Some("Fearless concurrency".into()),
            description: Some("Send, Sync and friends".into()),
            outline: Some("Threads, channels, async".into()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutApplication {
    pub activity: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub author: Uuid,
    pub activity: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

pub struct TestApp {
    addr: String,

    pub client: Client,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let server = app::run(listener, pool.clone()).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", &self.addr, path)
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(url))
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn activities_list(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "activities").send().await
    }

    pub async fn application_create(
        &self,
        new_application: &NewApplication,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, "applications")
            .json(new_application)
            .send()
            .await
    }

    pub async fn application_get(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("applications/{}", id))
            .send()
            .await
    }

    pub async fn application_put(
        &self,
        id: Uuid,
        update: &PutApplication,
    ) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("applications/{}", id))
            .json(update)
            .send()
            .await
    }

    pub async fn application_delete(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("applications/{}", id))
            .send()
            .await
    }

    pub async fn application_submit(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("applications/{}/submit", id))
            .send()
            .await
    }

    pub async fn applications_list(
        &self,
        query: &[(&str, DateTime<Utc>)],
    ) -> reqwest::Result<Response> {
        let query: Vec<_> = query
            .iter()
            .map(|(key, time)| (*key, time.to_rfc3339_opts(SecondsFormat::Micros, true)))
            .collect();

        self.request(Method::GET, "applications")
            .query(&query)
            .send()
            .await
    }

    pub async fn user_current_application(&self, author: Uuid) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("users/{}/currentapplication", author))
            .send()
            .await
    }

    /// Create an application and decode the response, panicking on failure
    pub async fn create_application(&self, new_application: &NewApplication) -> Application {
        let res = self
            .application_create(new_application)
            .await
            .expect("Failed to execute request");
        assert_eq!(reqwest::StatusCode::CREATED, res.status());

        res.json().await.expect("Failed to decode application")
    }
}
