//! Storage contracts, one trait per entity.
//!
//! Listings that carry derived fields return a record of `(entity, derived)`
//! so the entities themselves stay plain rows. The derived fields are
//! computed by the store as part of the listing query.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::events::{CreateEvent, Event, EventFilter, EventResponse, UpdateEvent};
use crate::gamers::{Gamer, GamerMessage, GamerUpdate};
use crate::games::{GameFilter, GameMessage, GameResponse};
use crate::gametypes::{GameType, GameTypeMessage};

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait GamerStore: Send + Sync {
    async fn find_gamers(&self) -> Result<Vec<Gamer>, ServiceError>;

    async fn find_gamer(&self, id: i64) -> Result<Gamer, ServiceError>;

    async fn find_gamer_by_username(&self, username: &str) -> Result<Gamer, ServiceError>;

    /// the password in `gamer` has to be hashed already
    async fn create_gamer(&self, gamer: &GamerMessage) -> Result<Gamer, ServiceError>;

    async fn update_gamer(&self, id: i64, gamer: &GamerUpdate) -> Result<(), ServiceError>;

    /// also removes the gamer's games, organized events and attendances
    async fn delete_gamer(&self, id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait GameTypeStore: Send + Sync {
    async fn find_game_types(&self) -> Result<Vec<GameType>, ServiceError>;

    async fn find_game_type(&self, id: i64) -> Result<GameType, ServiceError>;

    async fn create_game_type(&self, game_type: &GameTypeMessage)
        -> Result<GameType, ServiceError>;

    async fn update_game_type(
        &self,
        id: i64,
        game_type: &GameTypeMessage,
    ) -> Result<(), ServiceError>;

    /// also removes every game of this type
    async fn delete_game_type(&self, id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// all games with their event count, optionally limited to one game type
    async fn find_games(&self, filter: &GameFilter) -> Result<Vec<GameResponse>, ServiceError>;

    async fn find_game(&self, id: i64) -> Result<GameResponse, ServiceError>;

    async fn create_game(
        &self,
        gamer_id: i64,
        game: &GameMessage,
    ) -> Result<GameResponse, ServiceError>;

    async fn update_game(&self, id: i64, game: &GameMessage) -> Result<(), ServiceError>;

    /// also removes the game's events and their attendances
    async fn delete_game(&self, id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// all events with their attendees, `joined` is set for `gamer_id`
    async fn find_events(
        &self,
        gamer_id: i64,
        filter: &EventFilter,
    ) -> Result<Vec<EventResponse>, ServiceError>;

    async fn find_event(&self, gamer_id: i64, id: i64) -> Result<EventResponse, ServiceError>;

    async fn create_event(
        &self,
        organizer_id: i64,
        event: &CreateEvent,
    ) -> Result<Event, ServiceError>;

    async fn update_event(&self, id: i64, event: &UpdateEvent) -> Result<(), ServiceError>;

    /// also removes the event's attendances
    async fn delete_event(&self, id: i64) -> Result<(), ServiceError>;

    /// does nothing when the gamer already attends
    async fn add_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError>;

    /// does nothing when the gamer doesn't attend
    async fn remove_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError>;
}

/// Everything a request handler can reach
pub trait Store: GamerStore + GameTypeStore + GameStore + EventStore {}

impl<T> Store for T where T: GamerStore + GameTypeStore + GameStore + EventStore {}
