pub mod access_token;
pub mod kiosk;
pub mod natural_key;
pub mod password;
pub mod review;
pub mod user;
pub mod validation;
