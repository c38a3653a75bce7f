use std::sync::Arc;

use crate::auth::repo::UserStore;
use crate::config::AppConfig;
use crate::promos::repo::{PromoCode, PromoStore};

#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub promos: PromoStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let state = Self {
            users: UserStore::new(),
            promos: PromoStore::new(),
            config,
        };

        if state.promos.is_empty()? {
            state.promos.seed(demo_promos())?;
            tracing::info!("seeded demo promo codes");
        }

        Ok(state)
    }

    pub fn fake() -> Self {
        Self {
            users: UserStore::new(),
            promos: PromoStore::new(),
            config: Arc::new(AppConfig {
                host: "127.0.0.1".into(),
                port: 0,
            }),
        }
    }
}

fn demo_promos() -> Vec<PromoCode> {
    vec![
        PromoCode {
            id: 1,
            code: "SPRING20".into(),
            shop: "Flower Paradise".into(),
            discount: "20% off all bouquets".into(),
            description: "Discount on spring bouquets".into(),
            owner: "admin".into(),
            created_at: "01.03.2024 10:00".into(),
            is_active: true,
        },
        PromoCode {
            id: 2,
            code: "LOVE15".into(),
            shop: "Romantic Flowers".into(),
            discount: "15% off roses".into(),
            description: "Rose discount for March 8".into(),
            owner: "user1".into(),
            created_at: "02.03.2024 14:30".into(),
            is_active: true,
        },
        PromoCode {
            id: 3,
            code: "FLOWER500".into(),
            shop: "Flower Delivery".into(),
            discount: "500 off the first order".into(),
            description: "Discount for new customers".into(),
            owner: "user2".into(),
            created_at: "03.03.2024 09:15".into(),
            is_active: true,
        },
    ]
}
