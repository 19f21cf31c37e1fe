use sqlx::SqlitePool;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let pool = rnf_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    rnf_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
