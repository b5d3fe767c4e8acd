//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared PostGIS container across all tests in a binary.
//! The container and migrations are initialized once on first test, then reused.

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use takeout_core::domains::locations::PostgresCoordinateCache;
use takeout_core::kernel::{ServerDeps, TestDependencies};
use takeout_core::server::build_app;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // Postgres with the PostGIS extension available
        let postgres = Postgres::default()
            .with_name("postgis/postgis")
            .with_tag("16-3.4")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start PostGIS container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Tests share one database, so each test works in its own coordinate region
/// and zipcodes (see `fixtures::unique_center`).
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let deps = ctx.deps(TestDependencies::new());
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// ServerDeps with the real zipcode cache and the given mock geocoder
    /// and notifier
    pub fn deps(&self, test_deps: TestDependencies) -> ServerDeps {
        ServerDeps::new(
            self.db_pool.clone(),
            Arc::new(PostgresCoordinateCache::new(self.db_pool.clone())),
            test_deps.geocoder,
            test_deps.notifier,
            TestDependencies::moderation_config(),
            false,
        )
    }

    /// Full router over `deps`
    pub fn app(&self, test_deps: TestDependencies) -> Router {
        build_app(self.deps(test_deps), None)
    }
}
