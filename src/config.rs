use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct Config {
    database_url: String,
    api_host: Option<String>,
    api_port: Option<u16>,
    #[validate(length(min = 32))]
    session_private_key: String,
    /// upper bound of the postgres connection pool
    #[validate(range(min = 1))]
    database_max_connections: Option<u32>,
    /// only send the identity cookie over https
    #[serde(default)]
    secure_cookies: bool,
}

lazy_static! {
    static ref CONFIG: Config = match envy::from_env::<Config>() {
        Ok(config) => {
            match config.validate() {
                Ok(()) => config,
                Err(e) => panic!("invalid environment variable: {}", e),
            }
        }
        Err(error) => panic!("Missing or incorrect environment variable: {}", error),
    };
}

impl Config {
    /// read and validate the environment, panics on missing or invalid values
    pub fn init() {
        lazy_static::initialize(&CONFIG);
    }

    pub fn database_url() -> &'static str {
        CONFIG.database_url.as_ref()
    }

    pub fn api_host() -> &'static str {
        match &CONFIG.api_host {
            Some(host) => host.as_ref(),
            None => "localhost",
        }
    }

    pub fn api_port() -> u16 {
        CONFIG.api_port.unwrap_or(8080)
    }

    pub fn session_private_key() -> &'static str {
        CONFIG.session_private_key.as_ref()
    }

    pub fn database_max_connections() -> u32 {
        CONFIG.database_max_connections.unwrap_or(10)
    }

    pub fn secure_cookies() -> bool {
        CONFIG.secure_cookies
    }
}
