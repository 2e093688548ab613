use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::net::TcpListener;

use analyzer_client::{FetcherConfig, ReqwestFetcher, ScraperInspector};
use analyzer_db::Database;
use analyzer_server::routes;
use analyzer_server::state::AppState;

pub const SAMPLE_PAGE: &str = r#"<html>
<head>
    <title>Sample Page</title>
    <meta name="description" content="A page served for tests">
</head>
<body><h1>Sample Heading</h1></body>
</html>"#;

/// Router under test plus the pool and container backing it.
///
/// The container stops when this is dropped.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    _container: ContainerAsync<GenericImage>,
}

/// Spin up a PostgreSQL container and return the test app router + container handle.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "analyzer_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string = format!("postgresql://postgres:postgres@{host}:{port}/analyzer_test");

    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    };

    let db = Database::from_pool(pool.clone());
    db.migrate().await.expect("Failed to run migrations");

    let fetcher = ReqwestFetcher::with_config(&FetcherConfig {
        timeout: Duration::from_secs(2),
        ..FetcherConfig::default()
    })
    .expect("Failed to build fetcher");

    let state = Arc::new(AppState {
        db,
        fetcher,
        inspector: ScraperInspector::new().expect("Failed to build inspector"),
    });

    TestApp {
        router: routes::router(state),
        pool,
        _container: container,
    }
}

/// Serve a small site on localhost: `/` answers with [`SAMPLE_PAGE`].
/// Returns its base URL.
pub async fn spawn_origin() -> String {
    let app = Router::new().route(
        "/",
        get(|| async { (StatusCode::OK, Html(SAMPLE_PAGE)) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind origin");
    let addr = listener.local_addr().expect("Failed to get origin addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Origin server failed");
    });
    format!("http://{addr}")
}

/// An address on localhost where nothing listens.
pub async fn closed_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    drop(listener);
    format!("http://{addr}")
}
