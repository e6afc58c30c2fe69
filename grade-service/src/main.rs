use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use common_auth::TokenVerifier;
use grade_service::{router, AppState, GradeConfig, GradeService, RecordStore};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = GradeConfig::from_env()?;

    let verifier = Arc::new(TokenVerifier::new(config.signing.clone()));

    // The store connects lazily: the first request pays connection latency
    // and a failed connect is retried on the next access.
    let store = Arc::new(RecordStore::new(
        config.database_url.as_str(),
        &config.grades_table,
    ));
    let service = GradeService::new(store);

    let state = AppState { service, verifier };

    let allowed_origins = [
        "http://localhost:3000",
        "http://localhost:3001",
        "http://localhost:5173",
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static("authorization"),
        ]);

    let app = router(state).layer(cors);

    let ip: IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((ip, config.port));
    info!(%addr, "starting grade-service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
