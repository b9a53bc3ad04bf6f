use std::collections::HashMap;
use std::sync::Arc;

use kiosk_core::{AccessToken, AccessTokenStore, AccessTokenStoreError, TokenId, UserId};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapAccessTokenStore {
    tokens: Arc<RwLock<HashMap<TokenId, AccessToken>>>,
}

impl HashMapAccessTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccessTokenStore for HashMapAccessTokenStore {
    async fn create_token(&self, token: AccessToken) -> Result<AccessToken, AccessTokenStoreError> {
        self.tokens.write().await.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_token(&self, id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError> {
        Ok(self.tokens.read().await.get(id).cloned())
    }

    async fn delete_token(&self, id: &TokenId) -> Result<u64, AccessTokenStoreError> {
        let removed = self.tokens.write().await.remove(id);
        Ok(u64::from(removed.is_some()))
    }

    async fn delete_tokens_of(&self, user_id: UserId) -> Result<u64, AccessTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, token| token.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}
