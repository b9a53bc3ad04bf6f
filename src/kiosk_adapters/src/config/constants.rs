pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const SETTINGS_ENV_PREFIX: &str = "KIOSK";
}

pub const SETTINGS_FILE: &str = "config/settings";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}

pub mod defaults {
    pub const TOKEN_TTL_SECONDS: u32 = 3600;
    pub const LOGIN_MAX_ATTEMPTS: u32 = 5;
    pub const LOGIN_WINDOW_SECONDS: u64 = 60;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
}
