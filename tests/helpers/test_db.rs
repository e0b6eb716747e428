use bulletproof::infrastructure::persistence::Database;
use uuid::Uuid;

pub async fn setup_test_db() -> Database {
    // File-based SQLite, unique per test so tests can run in parallel
    let temp_file = std::env::temp_dir().join(format!("bulletproof_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations on test database");

    db
}

pub async fn teardown_test_db(db: Database) {
    db.pool().close().await;
}
