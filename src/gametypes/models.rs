use validator::Validate;

/// A category games are listed under, like "Strategy" or "Card"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameType {
    pub id: i64,
    pub name: String,
}

/// **POST /api/gametypes** and **PUT /api/gametypes/{id}**
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GameTypeMessage {
    #[validate(length(min = 1, max = 50, message = "name should be between 1 and 50 characters"))]
    pub name: String,
}
