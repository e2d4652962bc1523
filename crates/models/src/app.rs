use sea_orm::{entity::prelude::*, DatabaseConnection, Set};

use crate::errors::ModelError;

#[derive(Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "apps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub secret: Vec<u8>,
}

// Keep the signing secret out of logs.
impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Provision an application. Used by operators' tooling and tests; the
/// service itself only reads apps.
pub async fn create(db: &DatabaseConnection, id: i32, name: &str, secret: Vec<u8>) -> Result<Model, ModelError> {
    if id == 0 {
        return Err(ModelError::Validation("app id must be non-zero".into()));
    }
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if secret.is_empty() {
        return Err(ModelError::Validation("secret required".into()));
    }
    let am = ActiveModel { id: Set(id), name: Set(name.to_string()), secret: Set(secret) };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}
