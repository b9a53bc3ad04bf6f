pub mod identity_service;
pub mod kiosk_service;
pub mod review_service;
pub mod token_service;
