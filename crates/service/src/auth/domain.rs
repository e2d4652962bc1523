use serde::Deserialize;

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login input; `app_id` selects the application the token is minted for.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub app_id: i32,
}

/// Privilege check input
#[derive(Debug, Clone, Deserialize)]
pub struct IsAdminInput {
    #[serde(default)]
    pub user_id: i64,
}

/// Stored account (business view)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub pass_hash: Vec<u8>,
    pub is_admin: bool,
}

/// Calling application with its signing secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Application {
    pub id: i32,
    pub name: String,
    pub secret: Vec<u8>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl From<models::user::Model> for Account {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, email: m.email, pass_hash: m.pass_hash, is_admin: m.is_admin }
    }
}

impl From<models::app::Model> for Application {
    fn from(m: models::app::Model) -> Self {
        Self { id: m.id, name: m.name, secret: m.secret }
    }
}
