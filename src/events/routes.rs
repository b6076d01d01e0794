use actix_identity::Identity;
use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{delete, get, post, put};

use crate::auth;
use crate::errors::invalid_reference;
use crate::events::{CreateEvent, EventFilter, UpdateEvent};
use crate::server::{Response, State};
use crate::validator::Validator;

#[get("/events")]
async fn find_all(filter: Query<EventFilter>, state: Data<State>, id: Identity) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;

    let events = state.db.find_events(gamer_id, &filter).await?;

    http_ok_json!(events);
}

#[get("/events/{id}")]
async fn find(event_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;

    let event = state.db.find_event(gamer_id, event_id.into_inner()).await?;

    http_ok_json!(event);
}

#[post("/events")]
async fn create(event: Json<Validator<CreateEvent>>, state: Data<State>, id: Identity) -> Response {
    let organizer_id = auth::get_gamer_id(&id, &state).await?;
    let event = event.into_inner().validate()?;

    state
        .db
        .find_game(event.game)
        .await
        .map_err(invalid_reference("game", event.game))?;

    let event = state.db.create_event(organizer_id, &event).await?;
    debug!("gamer {} organized event {}", organizer_id, event.id);

    http_created_json!(event);
}

/// Any signed in gamer can change any event, including who organizes it
#[put("/events/{id}")]
async fn update(
    event_id: Path<i64>,
    event: Json<Validator<UpdateEvent>>,
    state: Data<State>,
    id: Identity,
) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;
    let event_id = event_id.into_inner();
    let event = event.into_inner().validate()?;

    state.db.find_event(gamer_id, event_id).await?;
    state.db.find_gamer(event.organizer).await?;
    state.db.find_game(event.game).await?;

    state.db.update_event(event_id, &event).await?;

    http_no_content!();
}

#[delete("/events/{id}")]
async fn delete(event_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    state.db.delete_event(event_id.into_inner()).await?;

    http_no_content!();
}

#[post("/events/{id}/signup")]
async fn signup(event_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;
    let event_id = event_id.into_inner();

    state.db.find_event(gamer_id, event_id).await?;
    state.db.add_attendee(event_id, gamer_id).await?;

    http_message!(Created, "Gamer added to event");
}

#[delete("/events/{id}/leave")]
async fn leave(event_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;
    let event_id = event_id.into_inner();

    state.db.find_event(gamer_id, event_id).await?;
    state.db.remove_attendee(event_id, gamer_id).await?;

    http_message!(Ok, "Gamer removed from event");
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
    cfg.service(signup);
    cfg.service(leave);
}
