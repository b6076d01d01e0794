/// Bail out with 403, the message tells the gamer what they can't touch
#[macro_export]
macro_rules! forbidden {
    ($message:expr) => {
        return Err($crate::errors::ServiceError::Forbidden($message.to_string()))
    };
}

#[macro_export]
macro_rules! bad_request {
    ($message:expr) => {
        return Err($crate::errors::ServiceError::BadRequest($message.to_string()))
    };
}

/// 201 with the created row as body
#[macro_export]
macro_rules! http_created_json {
    ($object:expr) => {
        return Ok(actix_web::HttpResponse::Created().json($object))
    };
}

#[macro_export]
macro_rules! http_ok_json {
    ($object:expr) => {
        return Ok(actix_web::HttpResponse::Ok().json($object))
    };
}

/// 204, used by every update and delete
#[macro_export]
macro_rules! http_no_content {
    () => {
        return Ok(actix_web::HttpResponse::NoContent().finish())
    };
}

/// Acknowledge an action with `{"message": ...}`
///
/// ``` ignore
/// http_message!(Created, "Gamer added to event");
/// ```
#[macro_export]
macro_rules! http_message {
    ($status:ident, $message:expr) => {
        return Ok(actix_web::HttpResponse::$status()
            .json($crate::serialization::Message::new($message)))
    };
}
