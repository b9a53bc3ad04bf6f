use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kiosk_core::{
    NaturalKey, NewUser, PasswordHash, User, UserCredentials, UserId, UserPatch, UserStore,
    UserStoreError,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, (User, PasswordHash)>,
    by_key: HashMap<NaturalKey, UserId>,
    last_id: i64,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_key.contains_key(&new_user.natural_key) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        users.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(users.last_id),
            firstname: new_user.firstname,
            lastname: new_user.lastname,
            country_code: new_user.natural_key.country_code.clone(),
            phone: new_user.natural_key.phone.clone(),
            created_at: now,
            updated_at: now,
        };

        users.by_key.insert(new_user.natural_key, user.id);
        users
            .by_id
            .insert(user.id, (user.clone(), new_user.password_hash));
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(&id)
            .map(|(user, _)| user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_credentials(
        &self,
        key: &NaturalKey,
    ) -> Result<Option<UserCredentials>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .by_key
            .get(key)
            .and_then(|id| users.by_id.get(id))
            .map(|(user, password_hash)| UserCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            }))
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let (user, password_hash) = users
            .by_id
            .get_mut(&id)
            .ok_or(UserStoreError::UserNotFound)?;

        if let Some(firstname) = patch.firstname {
            user.firstname = firstname;
        }
        if let Some(lastname) = patch.lastname {
            user.lastname = lastname;
        }
        if let Some(new_hash) = patch.password_hash {
            *password_hash = new_hash;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.by_id.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        users.by_key.remove(&user.natural_key());
        Ok(())
    }
}
