use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

use crate::serialization::time_of_day;

/// A gamer organizing a session of a game at a given date and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "game")]
    pub game_id: i64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    #[serde(rename = "organizer")]
    pub organizer_id: i64,
}

/// An event along with who is attending it
///
/// **GET /api/events**
///
/// ``` shell
/// curl --location --request GET 'http://localhost:8080/api/events?game=1'
/// [
///     {
///         "id": 1,
///         "game": 1,
///         "description": "Friday night",
///         "date": "2024-06-01",
///         "time": "19:00:00",
///         "organizer": 1,
///         "attendees": [2],
///         "attendees_count": 1,
///         "joined": false
///     }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventResponse {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub event: Event,
    /// ids of the attending gamers, ascending
    pub attendees: Vec<i64>,
    pub attendees_count: i64,
    /// true when the requesting gamer attends this event
    pub joined: bool,
}

/// **POST /api/events**
///
/// The organizer is always the gamer sending the request.
///
/// ``` shell
/// curl --location --request POST 'localhost:8080/api/events' \
///     --header 'Content-Type: application/json' \
///     --data-raw '{
///         "game": 1,
///         "description": "Friday night",
///         "date": "2024-06-01",
///         "time": "19:00"
///     }'
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateEvent {
    pub game: i64,
    #[validate(length(min = 1, message = "description may not be blank"))]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
}

/// **PUT /api/events/{id}**
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "description may not be blank"))]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub organizer: i64,
    pub game: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// only list the events of this game
    pub game: Option<i64>,
}
