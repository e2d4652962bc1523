#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory SQLite database.
///
/// The pool is pinned to one connection: each `sqlite::memory:` connection
/// would otherwise open its own empty database.
pub async fn get_db() -> DatabaseConnection {
    let cfg = configs::DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = models::db::connect_with_config(&cfg).await.expect("connect sqlite");
    migration::Migrator::up(&db, None).await.expect("migrate up");
    db
}
