/// Isolated test database utility that creates and cleans up temporary databases
/// Each test gets its own database that is automatically dropped when the test completes
///
/// This uses TEST_DATABASE_URL from the environment to connect to the test database server.
use bookshelf::shared::infrastructure::database::MIGRATIONS;
use bookshelf::shared::Database;
use diesel::r2d2::{self, ConnectionManager};
use diesel::{sql_query, Connection, PgConnection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated test database that automatically cleans up on drop
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_something() {
///     let Some(test_db) = TestDb::new() else { return };
///     test_db.run_test(|db| {
///         Box::pin(async move {
///             let repo = BookRepositoryImpl::new(db);
///             // Test...
///         })
///     }).await;
///     // Database automatically dropped here
/// }
/// ```
pub struct TestDb {
    server_url: String,
    name: String,
    database: Arc<Database>,
}

impl TestDb {
    /// Creates a new isolated test database with a unique name, or `None`
    /// when TEST_DATABASE_URL is not configured
    ///
    /// Database name format: bookshelf_test_{process_id}_{counter}
    pub fn new() -> Option<Self> {
        dotenvy::dotenv().ok();

        let Ok(server_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };

        let name = format!(
            "bookshelf_test_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::establish(&server_url)
            .expect("Failed to connect to test database server");
        sql_query(format!("CREATE DATABASE {}", name))
            .execute(&mut conn)
            .unwrap_or_else(|e| panic!("Failed to create test database {}: {}", name, e));

        // Replace the database name in the URL (everything after the last '/')
        let last_slash = server_url
            .rfind('/')
            .unwrap_or_else(|| panic!("Invalid TEST_DATABASE_URL format: {}", server_url));
        let isolated_url = format!("{}/{}", &server_url[..last_slash], name);

        let manager = ConnectionManager::<PgConnection>::new(isolated_url);
        let pool = r2d2::Pool::builder()
            .max_size(5)
            .test_on_check_out(true)
            .build(manager)
            .expect("Failed to build test database connection pool");

        Some(Self {
            server_url,
            name,
            database: Arc::new(Database::from_pool(pool)),
        })
    }

    /// Run a test with this isolated database
    ///
    /// Migrations are applied before the test receives the database
    pub async fn run_test(&self, test: impl FnOnce(Arc<Database>) -> BoxFuture<'static, ()>) {
        {
            let mut conn = self
                .database
                .get_connection()
                .expect("Unable to connect to the test database");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Unable to migrate the test database");
        }

        test(Arc::clone(&self.database)).await;
    }
}

impl Drop for TestDb {
    /// Terminates connections and drops the database; kept for debugging when the test panicked
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!(
                "TestDb leaking database '{}' due to panic, preserved for debugging",
                self.name
            );
            return;
        }

        let Ok(mut conn) = PgConnection::establish(&self.server_url) else {
            eprintln!("Failed to connect for cleanup of '{}'", self.name);
            return;
        };

        let terminate_result = sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.name
        ))
        .execute(&mut conn);
        if let Err(e) = terminate_result {
            eprintln!("Failed to terminate connections for '{}': {}", self.name, e);
        }

        if let Err(e) = sql_query(format!("DROP DATABASE IF EXISTS {}", self.name)).execute(&mut conn) {
            eprintln!("Failed to drop test database '{}': {}", self.name, e);
        }
    }
}
