use std::net::SocketAddr;

use axum::{extract::FromRef, Router};

use murmur_config::config;
use murmur_database::{Database, DatabaseInfo};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

mod routes;
mod util;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Configure logging and environment
    murmur_config::configure!(api);

    // Configure API schema
    #[derive(OpenApi)]
    #[openapi(
        paths(
            routes::root,
            routes::reports::submit_report::submit_report,
            routes::reports::fetch_reports::fetch_reports,
            routes::reports::add_reference::add_reference,
        ),
        components(
            schemas(
                murmur_models::v0::Report,
                murmur_models::v0::DataSubmitReport,
                routes::RootResponse,
            )
        ),
        tags(
            (name = "Reports", description = "Submit and browse anonymous anecdote reports.")
        )
    )]
    struct ApiDoc;

    let config = config().await;
    let state = AppState {
        database: DatabaseInfo::Auto
            .connect()
            .await
            .expect("Unable to connect to database"),
    };

    // Configure Axum and router
    let app = Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(routes::router())
        .with_state(state);

    // Configure TCP listener and bind
    let address = SocketAddr::new(
        config
            .api
            .host
            .parse()
            .expect("Valid host address in configuration"),
        config.api.port,
    );
    tracing::info!("Listening on {address}");
    tracing::info!("Play around with the API: http://localhost:{}/scalar", config.api.port);
    let listener = TcpListener::bind(&address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
