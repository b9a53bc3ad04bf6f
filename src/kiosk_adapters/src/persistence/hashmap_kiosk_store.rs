use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kiosk_core::{Kiosk, KioskId, KioskPatch, KioskStore, KioskStoreError, NewKiosk};
use tokio::sync::RwLock;

#[derive(Default)]
struct Kiosks {
    by_id: HashMap<KioskId, Kiosk>,
    last_id: i64,
}

#[derive(Default, Clone)]
pub struct HashMapKioskStore {
    kiosks: Arc<RwLock<Kiosks>>,
}

impl HashMapKioskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KioskStore for HashMapKioskStore {
    async fn add_kiosk(&self, kiosk: NewKiosk) -> Result<Kiosk, KioskStoreError> {
        let mut kiosks = self.kiosks.write().await;
        kiosks.last_id += 1;

        let now = Utc::now();
        let kiosk = Kiosk {
            id: KioskId::new(kiosks.last_id),
            title: kiosk.title,
            description: kiosk.description,
            geolocation: kiosk.geolocation,
            user_id: kiosk.user_id,
            created_at: now,
            updated_at: now,
        };
        kiosks.by_id.insert(kiosk.id, kiosk.clone());
        Ok(kiosk)
    }

    async fn get_kiosk(&self, id: KioskId) -> Result<Option<Kiosk>, KioskStoreError> {
        Ok(self.kiosks.read().await.by_id.get(&id).cloned())
    }

    async fn update_kiosk(&self, id: KioskId, patch: KioskPatch) -> Result<Kiosk, KioskStoreError> {
        let mut kiosks = self.kiosks.write().await;
        let kiosk = kiosks
            .by_id
            .get_mut(&id)
            .ok_or(KioskStoreError::KioskNotFound)?;

        if let Some(title) = patch.title {
            kiosk.title = title;
        }
        if let Some(description) = patch.description {
            kiosk.description = description;
        }
        if let Some(geolocation) = patch.geolocation {
            kiosk.geolocation = geolocation;
        }
        kiosk.updated_at = Utc::now();

        Ok(kiosk.clone())
    }

    async fn delete_kiosk(&self, id: KioskId) -> Result<(), KioskStoreError> {
        self.kiosks
            .write()
            .await
            .by_id
            .remove(&id)
            .ok_or(KioskStoreError::KioskNotFound)?;
        Ok(())
    }
}
