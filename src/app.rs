use std::fmt::Display;
use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpRequest, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{activities, applications, users};
use crate::error::RestError;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Malformed JSON bodies, query strings and path segments answer like any other parse error
fn extractor_error<E: Display>(err: E, _req: &HttpRequest) -> actix_web::Error {
    RestError::ParseError(err.to_string()).into()
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, pool: PgPool) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(web::JsonConfig::default().error_handler(extractor_error))
            .app_data(web::QueryConfig::default().error_handler(extractor_error))
            .app_data(web::PathConfig::default().error_handler(extractor_error))
            .service(health_check)
            .service(activities::scope())
            .service(applications::scope())
            .service(users::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
