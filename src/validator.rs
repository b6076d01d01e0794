use crate::errors::ServiceError;
use serde::de::DeserializeOwned;

/// Request body that has to pass its `validator` rules before it can be used.
///
/// ``` ignore
/// async fn create(game: Json<Validator<GameMessage>>) -> Response {
///     let game = game.into_inner().validate()?;
/// }
/// ```
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct Validator<T>(T);

impl<T> Validator<T> {
    #[allow(dead_code)]
    pub fn new(i: T) -> Validator<T> {
        Validator::<T>(i)
    }
}

impl<T> Validator<T>
where
    T: validator::Validate,
    T: DeserializeOwned,
{
    pub fn validate(self) -> Result<T, ServiceError> {
        self.0.validate()?;
        Ok(self.0)
    }
}
