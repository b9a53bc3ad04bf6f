//! In-memory doubles shared by the service tests.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI64, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use kiosk_core::{
    AccessToken, AccessTokenStore, AccessTokenStoreError, Kiosk, KioskId, KioskPatch, KioskStore,
    KioskStoreError, NaturalKey, NewKiosk, NewReview, NewUser, Password, PasswordHash,
    PasswordHasher, PasswordHasherError, Registration, Review, ReviewId, ReviewStore,
    ReviewStoreError, TokenId, User, UserCredentials, UserId, UserPatch, UserStore,
    UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, (User, PasswordHash)>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserStore {
    pub async fn stored_hash(&self, id: UserId) -> Option<String> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|(_, hash)| hash.as_ref().expose_secret().clone())
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|(u, _)| u.natural_key() == new_user.natural_key)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            firstname: new_user.firstname,
            lastname: new_user.lastname,
            country_code: new_user.natural_key.country_code,
            phone: new_user.natural_key.phone,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, (user.clone(), new_user.password_hash));
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_credentials(
        &self,
        key: &NaturalKey,
    ) -> Result<Option<UserCredentials>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(u, _)| &u.natural_key() == key)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let (user, hash) = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        if let Some(firstname) = patch.firstname {
            user.firstname = firstname;
        }
        if let Some(lastname) = patch.lastname {
            user.lastname = lastname;
        }
        if let Some(password_hash) = patch.password_hash {
            *hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(Clone, Default)]
pub struct MockTokenStore {
    tokens: Arc<RwLock<HashMap<TokenId, AccessToken>>>,
}

impl MockTokenStore {
    pub async fn insert(&self, token: AccessToken) {
        self.tokens.write().await.insert(token.id, token);
    }

    pub async fn contains(&self, id: &TokenId) -> bool {
        self.tokens.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl AccessTokenStore for MockTokenStore {
    async fn create_token(&self, token: AccessToken) -> Result<AccessToken, AccessTokenStoreError> {
        self.tokens.write().await.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_token(&self, id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError> {
        Ok(self.tokens.read().await.get(id).cloned())
    }

    async fn delete_token(&self, id: &TokenId) -> Result<u64, AccessTokenStoreError> {
        Ok(u64::from(self.tokens.write().await.remove(id).is_some()))
    }

    async fn delete_tokens_of(&self, user_id: UserId) -> Result<u64, AccessTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}

/// Token store whose backend is always down.
#[derive(Clone, Default)]
pub struct FailingTokenStore;

#[async_trait]
impl AccessTokenStore for FailingTokenStore {
    async fn create_token(&self, _token: AccessToken) -> Result<AccessToken, AccessTokenStoreError> {
        Err(AccessTokenStoreError::DatabaseError("connection refused".into()))
    }

    async fn find_token(&self, _id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError> {
        Err(AccessTokenStoreError::DatabaseError("connection refused".into()))
    }

    async fn delete_token(&self, _id: &TokenId) -> Result<u64, AccessTokenStoreError> {
        Err(AccessTokenStoreError::DatabaseError("connection refused".into()))
    }

    async fn delete_tokens_of(&self, _user_id: UserId) -> Result<u64, AccessTokenStoreError> {
        Err(AccessTokenStoreError::DatabaseError("connection refused".into()))
    }
}

/// Reversible "hash" that keeps tests fast. Counts calls to `verify`.
#[derive(Clone, Default)]
pub struct MockHasher {
    verifications: Arc<AtomicUsize>,
}

impl MockHasher {
    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for MockHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        password: Password,
        expected: PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(expected.as_ref().expose_secret()
            == &format!("hashed:{}", password.as_ref().expose_secret()))
    }

    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::new(Secret::from("decoy".to_owned()))
    }
}

#[derive(Clone, Default)]
pub struct MockKioskStore {
    kiosks: Arc<RwLock<HashMap<KioskId, Kiosk>>>,
    next_id: Arc<AtomicI64>,
}

#[async_trait]
impl KioskStore for MockKioskStore {
    async fn add_kiosk(&self, kiosk: NewKiosk) -> Result<Kiosk, KioskStoreError> {
        let now = Utc::now();
        let kiosk = Kiosk {
            id: KioskId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            title: kiosk.title,
            description: kiosk.description,
            geolocation: kiosk.geolocation,
            user_id: kiosk.user_id,
            created_at: now,
            updated_at: now,
        };
        self.kiosks.write().await.insert(kiosk.id, kiosk.clone());
        Ok(kiosk)
    }

    async fn get_kiosk(&self, id: KioskId) -> Result<Option<Kiosk>, KioskStoreError> {
        Ok(self.kiosks.read().await.get(&id).cloned())
    }

    async fn update_kiosk(&self, id: KioskId, patch: KioskPatch) -> Result<Kiosk, KioskStoreError> {
        let mut kiosks = self.kiosks.write().await;
        let kiosk = kiosks.get_mut(&id).ok_or(KioskStoreError::KioskNotFound)?;
        if let Some(title) = patch.title {
            kiosk.title = title;
        }
        if let Some(description) = patch.description {
            kiosk.description = description;
        }
        if let Some(geolocation) = patch.geolocation {
            kiosk.geolocation = geolocation;
        }
        Ok(kiosk.clone())
    }

    async fn delete_kiosk(&self, id: KioskId) -> Result<(), KioskStoreError> {
        self.kiosks
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(KioskStoreError::KioskNotFound)
    }
}

#[derive(Clone, Default)]
pub struct MockReviewStore {
    reviews: Arc<RwLock<Vec<Review>>>,
}

#[async_trait]
impl ReviewStore for MockReviewStore {
    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewStoreError> {
        let mut reviews = self.reviews.write().await;
        let now = Utc::now();
        let review = Review {
            id: ReviewId::new(reviews.len() as i64 + 1),
            user_id: review.user_id,
            author_id: review.author_id,
            comment: review.comment,
            mark: review.mark,
            created_at: now,
            updated_at: now,
        };
        reviews.push(review.clone());
        Ok(review)
    }

    async fn reviews_of(&self, user_id: UserId) -> Result<Vec<Review>, ReviewStoreError> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

pub fn registration(phone: &str, password: &str) -> Registration {
    Registration::parse(
        "Jane".into(),
        "Doe".into(),
        "+1".into(),
        phone.into(),
        Secret::from(password.to_string()),
    )
    .expect("valid registration")
}

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::from(value.to_string())).expect("valid password")
}

/// Insert a user directly, bypassing hashing.
pub async fn seed_user(store: &MockUserStore, phone: &str) -> User {
    let registration = registration(phone, "password123");
    store
        .add_user(NewUser {
            firstname: registration.firstname,
            lastname: registration.lastname,
            natural_key: registration.natural_key,
            password_hash: PasswordHash::new(Secret::from("hashed:password123".to_string())),
        })
        .await
        .expect("seeded user")
}
