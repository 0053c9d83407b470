//! Pooled SQLite connection

use di::inject;
use di::injectable;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, OnceLock};

/// Global override used by the integration tests: the DI container builds
/// `DatabaseConnection` itself, so tests park their in-memory pool here and
/// `create` picks it up instead of `DATABASE_URL`.
fn test_pool_slot() -> &'static Mutex<Option<SqlitePool>> {
    static SLOT: OnceLock<Mutex<Option<SqlitePool>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

pub struct DatabaseConnection {
    connection: SqlitePool,
}

#[injectable]
impl DatabaseConnection {
    #[inject]
    pub fn create() -> DatabaseConnection {
        if let Some(pool) = test_pool_slot().lock().expect("test pool lock poisoned").clone() {
            return DatabaseConnection { connection: pool };
        }

        dotenvy::dotenv().ok();
        let connection_string = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy(&connection_string)
            .expect("Cannot connect to database");

        DatabaseConnection { connection: pool }
    }
}

impl DatabaseConnection {
    pub fn set_test_pool(pool: SqlitePool) {
        *test_pool_slot().lock().expect("test pool lock poisoned") = Some(pool);
    }

    pub fn clear_test_pool() {
        *test_pool_slot().lock().expect("test pool lock poisoned") = None;
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl DerefMut for DatabaseConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.connection
    }
}
