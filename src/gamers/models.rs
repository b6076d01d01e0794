use argon2::Config;
use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use validator::Validate;

use crate::errors::ServiceError;

lazy_static! {
    static ref USERNAME_PATTERN: Regex =
        Regex::new(r"^[0-9A-Za-z_-]+$").expect("invalid username regex");
}

/// Registration of a new gamer account
///
/// **POST /api/register**
///
/// ``` shell
/// curl --location --request POST 'localhost:8080/api/register' \
///     --header 'Content-Type: application/json' \
///     --data-raw '{
///         "username": "rickybobby",
///         "password": "hunter2boogaloo",
///         "bio": "shake and bake"
///     }'
/// ```
#[derive(Deserialize, Validate, Debug)]
#[serde(deny_unknown_fields)]
pub struct GamerMessage {
    #[validate(
        length(min = 1, max = 20, message = "username should be between 1 and 20 characters"),
        regex(
            path = "USERNAME_PATTERN",
            message = "username can only contain letters, numbers, '-' and '_'"
        )
    )]
    pub username: String,
    #[validate(length(min = 8, message = "your password should at least be 8 characters long"))]
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Deserialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The only part of a gamer that can be changed after registration
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct GamerUpdate {
    pub bio: String,
}

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Gamer {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, skip_deserializing)]
    pub password: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

fn hash(password: &str) -> Result<String, ServiceError> {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let config = Config::default();

    let hash = argon2::hash_encoded(password.as_bytes(), &salt, &config)?;

    Ok(hash)
}

impl Gamer {
    pub fn verify_password(&self, password: &[u8]) -> Result<(), ServiceError> {
        let is_match = argon2::verify_encoded(&self.password, password)?;

        if !is_match {
            return Err(ServiceError::Unauthorized);
        }

        Ok(())
    }
}

impl GamerMessage {
    /// replaces the plain text password with its argon2 hash
    pub fn hash_password(&mut self) -> Result<(), ServiceError> {
        self.password = hash(&self.password)?;
        Ok(())
    }
}
