use async_trait::async_trait;

use crate::db;
use crate::errors::ServiceError;
use crate::events::{CreateEvent, Event, EventFilter, EventResponse, UpdateEvent};
use crate::gamers::{Gamer, GamerMessage, GamerUpdate};
use crate::games::{GameFilter, GameMessage, GameResponse};
use crate::gametypes::{GameType, GameTypeMessage};
use crate::store::{EventStore, GameStore, GameTypeStore, GamerStore};

const GAMER_COLUMNS: &str = "id, username, password, bio, created_at";

const GAME_COLUMNS: &str = r#"
    g.id, g.title, g.maker, g.number_of_players, g.skill_level, g.game_type_id, g.gamer_id,
    (SELECT COUNT(*) FROM events e WHERE e.game_id = g.id) AS event_count
"#;

/// `$1` is the gamer the `joined` flag is computed for
const EVENT_COLUMNS: &str = r#"
    e.id, e.game_id, e.description, e.date, e.time, e.organizer_id,
    ARRAY(
        SELECT a.gamer_id FROM event_gamers a WHERE a.event_id = e.id ORDER BY a.gamer_id
    ) AS attendees,
    (SELECT COUNT(*) FROM event_gamers a WHERE a.event_id = e.id) AS attendees_count,
    EXISTS(
        SELECT 1 FROM event_gamers a WHERE a.event_id = e.id AND a.gamer_id = $1
    ) AS joined
"#;

/// PostgreSQL backed store, cascades are enforced by the foreign keys
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: db::Pool,
}

impl PgStore {
    pub fn new(pool: db::Pool) -> Self {
        PgStore { pool }
    }
}

/// a write that touched no rows means the row didn't exist
fn affected(rows: u64, entity: &str) -> Result<(), ServiceError> {
    if rows == 0 {
        return Err(ServiceError::not_found(entity));
    }
    Ok(())
}

#[async_trait]
impl GamerStore for PgStore {
    async fn find_gamers(&self) -> Result<Vec<Gamer>, ServiceError> {
        let query = format!("SELECT {} FROM gamers ORDER BY username", GAMER_COLUMNS);

        let gamers = sqlx::query_as::<_, Gamer>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(gamers)
    }

    async fn find_gamer(&self, id: i64) -> Result<Gamer, ServiceError> {
        let query = format!("SELECT {} FROM gamers WHERE id = $1", GAMER_COLUMNS);

        sqlx::query_as::<_, Gamer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gamer"))
    }

    async fn find_gamer_by_username(&self, username: &str) -> Result<Gamer, ServiceError> {
        let query = format!("SELECT {} FROM gamers WHERE username = $1", GAMER_COLUMNS);

        sqlx::query_as::<_, Gamer>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gamer"))
    }

    async fn create_gamer(&self, gamer: &GamerMessage) -> Result<Gamer, ServiceError> {
        let query = format!(
            "INSERT INTO gamers (username, password, bio) VALUES ($1, $2, $3) RETURNING {}",
            GAMER_COLUMNS
        );

        let gamer = sqlx::query_as::<_, Gamer>(&query)
            .bind(&gamer.username)
            .bind(&gamer.password)
            .bind(&gamer.bio)
            .fetch_one(&self.pool)
            .await?;

        Ok(gamer)
    }

    async fn update_gamer(&self, id: i64, gamer: &GamerUpdate) -> Result<(), ServiceError> {
        let result = sqlx::query("UPDATE gamers SET bio = $2 WHERE id = $1")
            .bind(id)
            .bind(&gamer.bio)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "Gamer")
    }

    async fn delete_gamer(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM gamers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "Gamer")
    }
}

#[async_trait]
impl GameTypeStore for PgStore {
    async fn find_game_types(&self) -> Result<Vec<GameType>, ServiceError> {
        let game_types = sqlx::query_as::<_, GameType>("SELECT id, name FROM game_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(game_types)
    }

    async fn find_game_type(&self, id: i64) -> Result<GameType, ServiceError> {
        sqlx::query_as::<_, GameType>("SELECT id, name FROM game_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("GameType"))
    }

    async fn create_game_type(
        &self,
        game_type: &GameTypeMessage,
    ) -> Result<GameType, ServiceError> {
        let game_type = sqlx::query_as::<_, GameType>(
            "INSERT INTO game_types (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&game_type.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(game_type)
    }

    async fn update_game_type(
        &self,
        id: i64,
        game_type: &GameTypeMessage,
    ) -> Result<(), ServiceError> {
        let result = sqlx::query("UPDATE game_types SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(&game_type.name)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "GameType")
    }

    async fn delete_game_type(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM game_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "GameType")
    }
}

#[async_trait]
impl GameStore for PgStore {
    #[tracing::instrument(name = "PgStore::find_games", skip(self))]
    async fn find_games(&self, filter: &GameFilter) -> Result<Vec<GameResponse>, ServiceError> {
        let query = format!(
            "SELECT {} FROM games g WHERE ($1::BIGINT IS NULL OR g.game_type_id = $1) ORDER BY g.id",
            GAME_COLUMNS
        );

        let games = sqlx::query_as::<_, GameResponse>(&query)
            .bind(filter.game_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(games)
    }

    async fn find_game(&self, id: i64) -> Result<GameResponse, ServiceError> {
        let query = format!("SELECT {} FROM games g WHERE g.id = $1", GAME_COLUMNS);

        sqlx::query_as::<_, GameResponse>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Game"))
    }

    async fn create_game(
        &self,
        gamer_id: i64,
        game: &GameMessage,
    ) -> Result<GameResponse, ServiceError> {
        // a new game can't have events yet
        let game = sqlx::query_as::<_, GameResponse>(
            r#"
            INSERT INTO games (title, maker, number_of_players, skill_level, game_type_id, gamer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, maker, number_of_players, skill_level, game_type_id, gamer_id,
                0::BIGINT AS event_count
            "#,
        )
        .bind(&game.title)
        .bind(&game.maker)
        .bind(game.number_of_players)
        .bind(game.skill_level)
        .bind(game.game_type)
        .bind(gamer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    async fn update_game(&self, id: i64, game: &GameMessage) -> Result<(), ServiceError> {
        let result = sqlx::query(
            r#"
            UPDATE games
            SET title = $2, maker = $3, number_of_players = $4, skill_level = $5, game_type_id = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&game.title)
        .bind(&game.maker)
        .bind(game.number_of_players)
        .bind(game.skill_level)
        .bind(game.game_type)
        .execute(&self.pool)
        .await?;

        affected(result.rows_affected(), "Game")
    }

    async fn delete_game(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "Game")
    }
}

#[async_trait]
impl EventStore for PgStore {
    #[tracing::instrument(name = "PgStore::find_events", skip(self))]
    async fn find_events(
        &self,
        gamer_id: i64,
        filter: &EventFilter,
    ) -> Result<Vec<EventResponse>, ServiceError> {
        let query = format!(
            r#"
            SELECT {} FROM events e
            WHERE ($2::BIGINT IS NULL OR e.game_id = $2)
            ORDER BY e.date, e.time, e.id
            "#,
            EVENT_COLUMNS
        );

        let events = sqlx::query_as::<_, EventResponse>(&query)
            .bind(gamer_id)
            .bind(filter.game)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn find_event(&self, gamer_id: i64, id: i64) -> Result<EventResponse, ServiceError> {
        let query = format!("SELECT {} FROM events e WHERE e.id = $2", EVENT_COLUMNS);

        sqlx::query_as::<_, EventResponse>(&query)
            .bind(gamer_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    async fn create_event(
        &self,
        organizer_id: i64,
        event: &CreateEvent,
    ) -> Result<Event, ServiceError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (game_id, description, date, time, organizer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, game_id, description, date, time, organizer_id
            "#,
        )
        .bind(event.game)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.time)
        .bind(organizer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update_event(&self, id: i64, event: &UpdateEvent) -> Result<(), ServiceError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET description = $2, date = $3, time = $4, organizer_id = $5, game_id = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.time)
        .bind(event.organizer)
        .bind(event.game)
        .execute(&self.pool)
        .await?;

        affected(result.rows_affected(), "Event")
    }

    async fn delete_event(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected(), "Event")
    }

    #[tracing::instrument(name = "PgStore::add_attendee", skip(self))]
    async fn add_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO event_gamers (event_id, gamer_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(event_id)
        .bind(gamer_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(name = "PgStore::remove_attendee", skip(self))]
    async fn remove_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM event_gamers WHERE event_id = $1 AND gamer_id = $2")
            .bind(event_id)
            .bind(gamer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
