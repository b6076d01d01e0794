use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub maker: String,
    pub number_of_players: i32,
    pub skill_level: i32,
    #[serde(rename = "game_type")]
    pub game_type_id: i64,
    /// the gamer who added this game to the catalog
    #[serde(rename = "gamer")]
    pub gamer_id: i64,
}

/// A game with the amount of events that are organized for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameResponse {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub game: Game,
    pub event_count: i64,
}

///
/// **POST /api/games** and **PUT /api/games/{id}**
///
/// The gamer comes from the session, a body carrying `gamer` is rejected
/// with BadRequest(400) like any other unknown field.
///
/// When the game type doesn't exist, BadRequest(400) is returned on create
/// and NotFound(404) on update.
///
/// ``` shell
/// curl --location --request POST 'localhost:8080/api/games' \
///     --header 'Content-Type: application/json' \
///     --data-raw '{
///         "title": "Catan",
///         "maker": "KOSMOS",
///         "number_of_players": 4,
///         "skill_level": 2,
///         "game_type": 1
///     }'
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GameMessage {
    #[validate(length(min = 1, max = 50, message = "title should be between 1 and 50 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 40, message = "maker should be between 1 and 40 characters"))]
    pub maker: String,
    #[validate(range(min = 1, message = "a game needs at least one player"))]
    pub number_of_players: i32,
    #[validate(range(min = 1, message = "the skill level has to be positive"))]
    pub skill_level: i32,
    pub game_type: i64,
}

/// GameFilter a struct that the client
/// can use to query for games.
#[derive(Debug, Default, Deserialize)]
pub struct GameFilter {
    /// list games of a specific game type
    #[serde(rename = "type")]
    pub game_type: Option<i64>,
}
