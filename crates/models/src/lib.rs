pub mod app;
pub mod db;
pub mod errors;
pub mod user;

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::DatabaseConnection;

    use crate::{app, db, errors::ModelError, user};

    // A single pooled connection: every `sqlite::memory:` connection is its own database.
    async fn memory_db() -> DatabaseConnection {
        let cfg = configs::DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let db = db::connect_with_config(&cfg).await.expect("connect sqlite");
        migration::Migrator::up(&db, None).await.expect("migrate up");
        db
    }

    #[tokio::test]
    async fn user_create_and_lookup() {
        let db = memory_db().await;
        let u = user::create(&db, "bob@example.com", b"hash".to_vec()).await.unwrap();
        assert!(u.id > 0);
        assert!(!u.is_admin);

        let by_email = user::find_by_email(&db, "bob@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, u);
        assert!(user::find_by_email(&db, "Bob@example.com").await.unwrap().is_none());
        assert_eq!(user::find_by_id(&db, u.id).await.unwrap(), Some(u));
    }

    #[tokio::test]
    async fn user_duplicate_email_is_reported() {
        let db = memory_db().await;
        user::create(&db, "dup@example.com", b"h1".to_vec()).await.unwrap();
        let err = user::create(&db, "dup@example.com", b"h2".to_vec()).await.unwrap_err();
        assert!(matches!(err, ModelError::Duplicate(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn user_requires_email_and_hash() {
        let db = memory_db().await;
        assert!(matches!(user::create(&db, " ", b"h".to_vec()).await, Err(ModelError::Validation(_))));
        assert!(matches!(user::create(&db, "a@b.c", Vec::new()).await, Err(ModelError::Validation(_))));
    }

    #[tokio::test]
    async fn app_create_and_lookup() {
        let db = memory_db().await;
        let a = app::create(&db, 7, "billing", b"s3cr3t".to_vec()).await.unwrap();
        assert_eq!(a.id, 7);
        assert_eq!(app::find_by_id(&db, 7).await.unwrap(), Some(a.clone()));
        assert!(app::find_by_id(&db, 8).await.unwrap().is_none());
        assert!(!format!("{a:?}").contains("s3cr3t"));

        let err = app::create(&db, 8, "other", b"s3cr3t".to_vec()).await.unwrap_err();
        assert!(matches!(err, ModelError::Duplicate(_)));
    }
}
