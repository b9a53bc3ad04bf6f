pub mod bearer_token_validator;
