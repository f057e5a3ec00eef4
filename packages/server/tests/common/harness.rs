//! Test harness with testcontainers for Postgres integration testing.
//!
//! One container is shared by every test in a binary. Each test gets its own
//! freshly migrated database inside it, so tests can run in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use personnel_core::kernel::ServerDeps;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::HttpClient;

struct SharedTestInfra {
    host: String,
    port: u16,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();
static DATABASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --ignored --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?.to_string();
        let port = postgres.get_host_port_ipv4(5432).await?;

        Ok(Self {
            host,
            port,
            _postgres: postgres,
        })
    }

    fn url(host: &str, port: u16, database: &str) -> String {
        format!("postgresql://postgres:postgres@{host}:{port}/{database}")
    }

    /// Creates and migrates a new empty database.
    async fn fresh_database(&self) -> Result<PgPool> {
        let name = format!(
            "personnel_test_{}",
            DATABASE_COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        // Pools are tied to the runtime that opened them, and every test has
        // its own runtime, so the admin connection is not shared.
        let admin = PgPool::connect(&Self::url(&self.host, self.port, "postgres"))
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(&format!("CREATE DATABASE {name}"))
            .execute(&admin)
            .await
            .with_context(|| format!("Failed to create database {name}"))?;
        admin.close().await;

        let pool = PgPool::connect(&Self::url(&self.host, self.port, &name))
            .await
            .context("Failed to connect to test database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(pool)
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

/// Postgres-backed test context.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// #[ignore = "requires docker"]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.http();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Pool is dropped with the harness
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let db_pool = SharedTestInfra::get().await.fresh_database().await?;
        Ok(Self { db_pool })
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::postgres(self.db_pool.clone())
    }

    pub fn http(&self) -> HttpClient {
        HttpClient::new(self.deps())
    }
}
