use kiosk_core::{Kiosk, KioskId, KioskPatch, KioskStore, KioskStoreError, NewKiosk, UserId};

#[derive(Debug, thiserror::Error)]
pub enum KioskServiceError {
    #[error("Kiosk not found")]
    NotFound,
    #[error("Only the owner may change this kiosk")]
    Forbidden,
    #[error("Kiosk owner not found")]
    OwnerNotFound,
    #[error("Kiosk store error: {0}")]
    StoreError(KioskStoreError),
}

impl From<KioskStoreError> for KioskServiceError {
    fn from(e: KioskStoreError) -> Self {
        match e {
            KioskStoreError::KioskNotFound => Self::NotFound,
            KioskStoreError::OwnerNotFound => Self::OwnerNotFound,
            e => Self::StoreError(e),
        }
    }
}

/// Kiosks are readable by every authenticated user; only the owner can change
/// or remove one.
#[derive(Clone)]
pub struct KioskService<K>
where
    K: KioskStore,
{
    store: K,
}

impl<K> KioskService<K>
where
    K: KioskStore,
{
    pub fn new(store: K) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "KioskService::create", skip_all, fields(owner = %kiosk.user_id))]
    pub async fn create(&self, kiosk: NewKiosk) -> Result<Kiosk, KioskServiceError> {
        Ok(self.store.add_kiosk(kiosk).await?)
    }

    #[tracing::instrument(name = "KioskService::get", skip(self))]
    pub async fn get(&self, id: KioskId) -> Result<Kiosk, KioskServiceError> {
        self.store
            .get_kiosk(id)
            .await?
            .ok_or(KioskServiceError::NotFound)
    }

    #[tracing::instrument(name = "KioskService::update", skip(self, patch))]
    pub async fn update(
        &self,
        caller: UserId,
        id: KioskId,
        patch: KioskPatch,
    ) -> Result<Kiosk, KioskServiceError> {
        self.owned_by(caller, id).await?;
        Ok(self.store.update_kiosk(id, patch).await?)
    }

    #[tracing::instrument(name = "KioskService::delete", skip(self))]
    pub async fn delete(&self, caller: UserId, id: KioskId) -> Result<(), KioskServiceError> {
        self.owned_by(caller, id).await?;
        Ok(self.store.delete_kiosk(id).await?)
    }

    async fn owned_by(&self, caller: UserId, id: KioskId) -> Result<Kiosk, KioskServiceError> {
        let kiosk = self.get(id).await?;
        if kiosk.user_id != caller {
            return Err(KioskServiceError::Forbidden);
        }
        Ok(kiosk)
    }
}
