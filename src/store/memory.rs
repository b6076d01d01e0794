use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::{ServiceError, ALREADY_EXISTS, MISSING_REFERENCE};
use crate::events::{CreateEvent, Event, EventFilter, EventResponse, UpdateEvent};
use crate::gamers::{Gamer, GamerMessage, GamerUpdate};
use crate::games::{Game, GameFilter, GameMessage, GameResponse};
use crate::gametypes::{GameType, GameTypeMessage};
use crate::store::{EventStore, GameStore, GameTypeStore, GamerStore};

#[derive(Default)]
struct Sequences {
    gamers: i64,
    game_types: i64,
    games: i64,
    events: i64,
}

fn next(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

/// mimics a foreign key violation
fn check_reference(exists: bool) -> Result<(), ServiceError> {
    if !exists {
        bad_request!(MISSING_REFERENCE);
    }
    Ok(())
}

#[derive(Default)]
struct Tables {
    sequences: Sequences,
    gamers: BTreeMap<i64, Gamer>,
    game_types: BTreeMap<i64, GameType>,
    games: BTreeMap<i64, Game>,
    events: BTreeMap<i64, Event>,
    /// (event_id, gamer_id)
    attendance: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn remove_event(&mut self, id: i64) -> Option<Event> {
        self.attendance.retain(|(event_id, _)| *event_id != id);
        self.events.remove(&id)
    }

    fn remove_game(&mut self, id: i64) -> Option<Game> {
        let events: Vec<i64> = self
            .events
            .values()
            .filter(|event| event.game_id == id)
            .map(|event| event.id)
            .collect();

        for event_id in events {
            self.remove_event(event_id);
        }

        self.games.remove(&id)
    }

    fn event_response(&self, event: &Event, gamer_id: i64) -> EventResponse {
        let attendees: Vec<i64> = self
            .attendance
            .range((event.id, i64::MIN)..=(event.id, i64::MAX))
            .map(|(_, gamer_id)| *gamer_id)
            .collect();

        EventResponse {
            event: event.clone(),
            attendees_count: attendees.len() as i64,
            joined: attendees.contains(&gamer_id),
            attendees,
        }
    }

    fn game_response(&self, game: &Game) -> GameResponse {
        let event_count = self
            .events
            .values()
            .filter(|event| event.game_id == game.id)
            .count();

        GameResponse {
            game: game.clone(),
            event_count: event_count as i64,
        }
    }
}

/// Keeps everything in process, cascades like the postgres schema does
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl GamerStore for MemoryStore {
    async fn find_gamers(&self) -> Result<Vec<Gamer>, ServiceError> {
        let tables = self.tables.read().await;

        let mut gamers: Vec<Gamer> = tables.gamers.values().cloned().collect();
        gamers.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(gamers)
    }

    async fn find_gamer(&self, id: i64) -> Result<Gamer, ServiceError> {
        let tables = self.tables.read().await;

        tables
            .gamers
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Gamer"))
    }

    async fn find_gamer_by_username(&self, username: &str) -> Result<Gamer, ServiceError> {
        let tables = self.tables.read().await;

        tables
            .gamers
            .values()
            .find(|gamer| gamer.username == username)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Gamer"))
    }

    async fn create_gamer(&self, gamer: &GamerMessage) -> Result<Gamer, ServiceError> {
        let mut tables = self.tables.write().await;

        if tables
            .gamers
            .values()
            .any(|existing| existing.username == gamer.username)
        {
            return Err(ServiceError::Conflict(ALREADY_EXISTS.to_string()));
        }

        let gamer = Gamer {
            id: next(&mut tables.sequences.gamers),
            username: gamer.username.clone(),
            password: gamer.password.clone(),
            bio: gamer.bio.clone(),
            created_at: Utc::now(),
        };
        tables.gamers.insert(gamer.id, gamer.clone());

        Ok(gamer)
    }

    async fn update_gamer(&self, id: i64, update: &GamerUpdate) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        let gamer = tables
            .gamers
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("Gamer"))?;
        gamer.bio = update.bio.clone();

        Ok(())
    }

    async fn delete_gamer(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        if !tables.gamers.contains_key(&id) {
            return Err(ServiceError::not_found("Gamer"));
        }

        let games: Vec<i64> = tables
            .games
            .values()
            .filter(|game| game.gamer_id == id)
            .map(|game| game.id)
            .collect();
        for game_id in games {
            tables.remove_game(game_id);
        }

        let events: Vec<i64> = tables
            .events
            .values()
            .filter(|event| event.organizer_id == id)
            .map(|event| event.id)
            .collect();
        for event_id in events {
            tables.remove_event(event_id);
        }

        tables.attendance.retain(|(_, gamer_id)| *gamer_id != id);
        tables.gamers.remove(&id);

        Ok(())
    }
}

#[async_trait]
impl GameTypeStore for MemoryStore {
    async fn find_game_types(&self) -> Result<Vec<GameType>, ServiceError> {
        let tables = self.tables.read().await;

        Ok(tables.game_types.values().cloned().collect())
    }

    async fn find_game_type(&self, id: i64) -> Result<GameType, ServiceError> {
        let tables = self.tables.read().await;

        tables
            .game_types
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("GameType"))
    }

    async fn create_game_type(
        &self,
        game_type: &GameTypeMessage,
    ) -> Result<GameType, ServiceError> {
        let mut tables = self.tables.write().await;

        let game_type = GameType {
            id: next(&mut tables.sequences.game_types),
            name: game_type.name.clone(),
        };
        tables.game_types.insert(game_type.id, game_type.clone());

        Ok(game_type)
    }

    async fn update_game_type(
        &self,
        id: i64,
        update: &GameTypeMessage,
    ) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        let game_type = tables
            .game_types
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("GameType"))?;
        game_type.name = update.name.clone();

        Ok(())
    }

    async fn delete_game_type(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        if tables.game_types.remove(&id).is_none() {
            return Err(ServiceError::not_found("GameType"));
        }

        let games: Vec<i64> = tables
            .games
            .values()
            .filter(|game| game.game_type_id == id)
            .map(|game| game.id)
            .collect();
        for game_id in games {
            tables.remove_game(game_id);
        }

        Ok(())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn find_games(&self, filter: &GameFilter) -> Result<Vec<GameResponse>, ServiceError> {
        let tables = self.tables.read().await;

        let games = tables
            .games
            .values()
            .filter(|game| match filter.game_type {
                Some(game_type) => game.game_type_id == game_type,
                None => true,
            })
            .map(|game| tables.game_response(game))
            .collect();

        Ok(games)
    }

    async fn find_game(&self, id: i64) -> Result<GameResponse, ServiceError> {
        let tables = self.tables.read().await;

        tables
            .games
            .get(&id)
            .map(|game| tables.game_response(game))
            .ok_or_else(|| ServiceError::not_found("Game"))
    }

    async fn create_game(
        &self,
        gamer_id: i64,
        game: &GameMessage,
    ) -> Result<GameResponse, ServiceError> {
        let mut tables = self.tables.write().await;

        check_reference(tables.game_types.contains_key(&game.game_type))?;
        check_reference(tables.gamers.contains_key(&gamer_id))?;

        let game = Game {
            id: next(&mut tables.sequences.games),
            title: game.title.clone(),
            maker: game.maker.clone(),
            number_of_players: game.number_of_players,
            skill_level: game.skill_level,
            game_type_id: game.game_type,
            gamer_id,
        };
        tables.games.insert(game.id, game.clone());

        Ok(tables.game_response(&game))
    }

    async fn update_game(&self, id: i64, update: &GameMessage) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        check_reference(tables.game_types.contains_key(&update.game_type))?;

        let game = tables
            .games
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("Game"))?;
        game.title = update.title.clone();
        game.maker = update.maker.clone();
        game.number_of_players = update.number_of_players;
        game.skill_level = update.skill_level;
        game.game_type_id = update.game_type;

        Ok(())
    }

    async fn delete_game(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        tables
            .remove_game(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("Game"))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn find_events(
        &self,
        gamer_id: i64,
        filter: &EventFilter,
    ) -> Result<Vec<EventResponse>, ServiceError> {
        let tables = self.tables.read().await;

        let mut events: Vec<&Event> = tables
            .events
            .values()
            .filter(|event| match filter.game {
                Some(game_id) => event.game_id == game_id,
                None => true,
            })
            .collect();
        events.sort_by_key(|event| (event.date, event.time, event.id));

        Ok(events
            .into_iter()
            .map(|event| tables.event_response(event, gamer_id))
            .collect())
    }

    async fn find_event(&self, gamer_id: i64, id: i64) -> Result<EventResponse, ServiceError> {
        let tables = self.tables.read().await;

        tables
            .events
            .get(&id)
            .map(|event| tables.event_response(event, gamer_id))
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    async fn create_event(
        &self,
        organizer_id: i64,
        event: &CreateEvent,
    ) -> Result<Event, ServiceError> {
        let mut tables = self.tables.write().await;

        check_reference(tables.games.contains_key(&event.game))?;
        check_reference(tables.gamers.contains_key(&organizer_id))?;

        let event = Event {
            id: next(&mut tables.sequences.events),
            game_id: event.game,
            description: event.description.clone(),
            date: event.date,
            time: event.time,
            organizer_id,
        };
        tables.events.insert(event.id, event.clone());

        Ok(event)
    }

    async fn update_event(&self, id: i64, update: &UpdateEvent) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        check_reference(tables.games.contains_key(&update.game))?;
        check_reference(tables.gamers.contains_key(&update.organizer))?;

        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("Event"))?;
        event.description = update.description.clone();
        event.date = update.date;
        event.time = update.time;
        event.organizer_id = update.organizer;
        event.game_id = update.game;

        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        tables
            .remove_event(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    async fn add_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        check_reference(tables.events.contains_key(&event_id))?;
        check_reference(tables.gamers.contains_key(&gamer_id))?;

        tables.attendance.insert((event_id, gamer_id));

        Ok(())
    }

    async fn remove_attendee(&self, event_id: i64, gamer_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;

        tables.attendance.remove(&(event_id, gamer_id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    async fn seeded() -> (MemoryStore, i64, i64) {
        let store = MemoryStore::default();

        let gamer = store
            .create_gamer(&GamerMessage {
                username: String::from("organizer"),
                password: String::from("hashed"),
                bio: String::new(),
            })
            .await
            .unwrap();

        let game_type = store
            .create_game_type(&GameTypeMessage {
                name: String::from("Strategy"),
            })
            .await
            .unwrap();

        let game = store
            .create_game(
                gamer.id,
                &GameMessage {
                    title: String::from("Catan"),
                    maker: String::from("KOSMOS"),
                    number_of_players: 4,
                    skill_level: 2,
                    game_type: game_type.id,
                },
            )
            .await
            .unwrap();

        (store, gamer.id, game.game.id)
    }

    fn friday_night(game: i64) -> CreateEvent {
        CreateEvent {
            game,
            description: String::from("Friday night"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        }
    }

    #[actix_rt::test]
    async fn events_are_ordered_by_schedule() {
        let (store, gamer_id, game_id) = seeded().await;

        let late = store
            .create_event(gamer_id, &friday_night(game_id))
            .await
            .unwrap();

        let mut early = friday_night(game_id);
        early.time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let early = store.create_event(gamer_id, &early).await.unwrap();

        let events = store
            .find_events(gamer_id, &EventFilter::default())
            .await
            .unwrap();
        let ids: Vec<i64> = events.iter().map(|e| e.event.id).collect();

        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[actix_rt::test]
    async fn attendance_requires_existing_rows() {
        let (store, gamer_id, _) = seeded().await;

        assert!(matches!(
            store.add_attendee(42, gamer_id).await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[actix_rt::test]
    async fn event_count_follows_the_events() {
        let (store, gamer_id, game_id) = seeded().await;

        let event = store
            .create_event(gamer_id, &friday_night(game_id))
            .await
            .unwrap();
        assert_eq!(store.find_game(game_id).await.unwrap().event_count, 1);

        store.delete_event(event.id).await.unwrap();
        assert_eq!(store.find_game(game_id).await.unwrap().event_count, 0);
    }
}
