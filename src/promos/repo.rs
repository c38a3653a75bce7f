use std::sync::{Arc, RwLock};

use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::error::AppError;

const CREATED_AT_FORMAT: &[FormatItem<'static>] =
    format_description!("[day].[month].[year] [hour]:[minute]");

/// A shared promo code record. `owner` is fixed at creation; only the fields
/// on the edit form are ever rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct PromoCode {
    pub id: u64,
    pub code: String,
    pub shop: String,
    pub discount: String,
    pub description: String,
    pub owner: String,
    pub created_at: String,
    pub is_active: bool,
}

/// Fields accepted from the add and edit forms.
#[derive(Debug, Clone)]
pub struct PromoFields {
    pub code: String,
    pub shop: String,
    pub discount: String,
    pub description: String,
}

struct Shelf {
    promos: Vec<PromoCode>,
    next_id: u64,
}

/// In-memory promo code store. The id counter lives under the same lock as
/// the collection, so ids stay strictly increasing across concurrent creates
/// and are never reused after deletions. Collection order is insertion order
/// and doubles as display order.
#[derive(Clone)]
pub struct PromoStore {
    inner: Arc<RwLock<Shelf>>,
}

impl Default for PromoStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Shelf {
                promos: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

impl PromoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_all(&self) -> Result<Vec<PromoCode>, AppError> {
        let shelf = self.inner.read().map_err(AppError::internal)?;
        Ok(shelf.promos.clone())
    }

    pub fn list_by_owner(&self, username: &str) -> Result<Vec<PromoCode>, AppError> {
        let shelf = self.inner.read().map_err(AppError::internal)?;
        Ok(shelf
            .promos
            .iter()
            .filter(|p| p.owner == username)
            .cloned()
            .collect())
    }

    pub fn create(&self, fields: PromoFields, owner: &str) -> Result<PromoCode, AppError> {
        let mut shelf = self.inner.write().map_err(AppError::internal)?;
        let promo = PromoCode {
            id: shelf.next_id,
            code: fields.code,
            shop: fields.shop,
            discount: fields.discount,
            description: fields.description,
            owner: owner.to_string(),
            created_at: created_at_stamp(),
            is_active: true,
        };
        shelf.next_id += 1;
        shelf.promos.push(promo.clone());
        Ok(promo)
    }

    pub fn find_by_id(&self, id: u64) -> Result<PromoCode, AppError> {
        let shelf = self.inner.read().map_err(AppError::internal)?;
        shelf
            .promos
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    pub fn update(&self, id: u64, fields: PromoFields, requester: &str) -> Result<(), AppError> {
        let mut shelf = self.inner.write().map_err(AppError::internal)?;
        let promo = shelf
            .promos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        if promo.owner != requester {
            return Err(AppError::Forbidden);
        }
        promo.code = fields.code;
        promo.shop = fields.shop;
        promo.discount = fields.discount;
        promo.description = fields.description;
        Ok(())
    }

    pub fn delete(&self, id: u64, requester: &str) -> Result<(), AppError> {
        let mut shelf = self.inner.write().map_err(AppError::internal)?;
        let promo = shelf
            .promos
            .iter()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        if promo.owner != requester {
            return Err(AppError::Forbidden);
        }
        shelf.promos.retain(|p| p.id != id);
        Ok(())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        let shelf = self.inner.read().map_err(AppError::internal)?;
        Ok(shelf.promos.is_empty())
    }

    /// Bootstrap only: append fixed records and move the counter past the
    /// highest seeded id. Callers check `is_empty` first.
    pub fn seed(&self, records: Vec<PromoCode>) -> Result<(), AppError> {
        let mut shelf = self.inner.write().map_err(AppError::internal)?;
        for record in records {
            shelf.next_id = shelf.next_id.max(record.id + 1);
            shelf.promos.push(record);
        }
        Ok(())
    }
}

fn created_at_stamp() -> String {
    // Local wall-clock time; UTC when the local offset cannot be determined.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(CREATED_AT_FORMAT).unwrap_or_default()
}

#[cfg(test)]
mod promo_store_tests {
    use super::*;

    fn fields(code: &str, shop: &str, discount: &str) -> PromoFields {
        PromoFields {
            code: code.into(),
            shop: shop.into(),
            discount: discount.into(),
            description: String::new(),
        }
    }

    #[test]
    fn ids_increase_and_are_never_reused() {
        let store = PromoStore::new();
        let first = store.create(fields("A", "S", "1%"), "alice").expect("create");
        let second = store.create(fields("B", "S", "2%"), "alice").expect("create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        store.delete(second.id, "alice").expect("delete");
        let third = store.create(fields("C", "S", "3%"), "alice").expect("create");
        assert_eq!(third.id, 3);
    }

    #[test]
    fn created_promo_is_listed_and_deleted_promo_is_not() {
        let store = PromoStore::new();
        let promo = store.create(fields("A", "S", "1%"), "alice").expect("create");

        let all = store.list_all().expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, promo.id);

        store.delete(promo.id, "alice").expect("delete");
        assert!(store.list_all().expect("list").is_empty());
        assert_eq!(store.find_by_id(promo.id).unwrap_err(), AppError::NotFound);
    }

    #[test]
    fn update_overwrites_form_fields_only() {
        let store = PromoStore::new();
        let promo = store
            .create(
                PromoFields {
                    code: "OLD".into(),
                    shop: "Old Shop".into(),
                    discount: "5%".into(),
                    description: "old".into(),
                },
                "alice",
            )
            .expect("create");

        store
            .update(
                promo.id,
                PromoFields {
                    code: "NEW".into(),
                    shop: "New Shop".into(),
                    discount: "50%".into(),
                    description: "new".into(),
                },
                "alice",
            )
            .expect("update");

        let updated = store.find_by_id(promo.id).expect("find");
        assert_eq!(updated.code, "NEW");
        assert_eq!(updated.shop, "New Shop");
        assert_eq!(updated.discount, "50%");
        assert_eq!(updated.description, "new");
        assert_eq!(updated.id, promo.id);
        assert_eq!(updated.owner, promo.owner);
        assert_eq!(updated.created_at, promo.created_at);
        assert!(updated.is_active);
    }

    #[test]
    fn update_by_non_owner_is_forbidden_and_leaves_record_unchanged() {
        let store = PromoStore::new();
        let promo = store.create(fields("A", "S", "1%"), "alice").expect("create");

        let err = store
            .update(promo.id, fields("B", "T", "2%"), "bob")
            .unwrap_err();
        assert_eq!(err, AppError::Forbidden);

        let unchanged = store.find_by_id(promo.id).expect("find");
        assert_eq!(unchanged.code, "A");
        assert_eq!(unchanged.shop, "S");
    }

    #[test]
    fn delete_by_non_owner_is_forbidden() {
        let store = PromoStore::new();
        let promo = store.create(fields("A", "S", "1%"), "alice").expect("create");

        assert_eq!(store.delete(promo.id, "bob").unwrap_err(), AppError::Forbidden);
        assert_eq!(store.list_all().expect("list").len(), 1);
    }

    #[test]
    fn unknown_id_is_not_found_for_every_operation() {
        let store = PromoStore::new();
        assert_eq!(store.find_by_id(999).unwrap_err(), AppError::NotFound);
        assert_eq!(
            store.update(999, fields("A", "S", "1%"), "alice").unwrap_err(),
            AppError::NotFound
        );
        assert_eq!(store.delete(999, "alice").unwrap_err(), AppError::NotFound);
    }

    #[test]
    fn list_by_owner_is_the_owner_subset_in_insertion_order() {
        let store = PromoStore::new();
        store.create(fields("A", "S", "1%"), "alice").expect("create");
        store.create(fields("B", "S", "2%"), "bob").expect("create");
        store.create(fields("C", "S", "3%"), "alice").expect("create");

        let alices = store.list_by_owner("alice").expect("list");
        assert_eq!(
            alices.iter().map(|p| p.code.as_str()).collect::<Vec<_>>(),
            vec!["A", "C"]
        );

        let all = store.list_all().expect("list");
        let alice_subset: Vec<_> = all
            .iter()
            .filter(|p| p.owner == "alice")
            .map(|p| p.id)
            .collect();
        assert_eq!(
            alices.iter().map(|p| p.id).collect::<Vec<_>>(),
            alice_subset
        );
    }

    #[test]
    fn seeded_store_assigns_ids_after_the_highest_seed() {
        let store = PromoStore::new();
        store
            .seed(vec![
                PromoCode {
                    id: 1,
                    code: "SEED1".into(),
                    shop: "Shop".into(),
                    discount: "10%".into(),
                    description: String::new(),
                    owner: "admin".into(),
                    created_at: "01.03.2024 10:00".into(),
                    is_active: true,
                },
                PromoCode {
                    id: 3,
                    code: "SEED3".into(),
                    shop: "Shop".into(),
                    discount: "30%".into(),
                    description: String::new(),
                    owner: "admin".into(),
                    created_at: "03.03.2024 09:15".into(),
                    is_active: true,
                },
            ])
            .expect("seed");

        let next = store.create(fields("A", "S", "1%"), "alice").expect("create");
        assert_eq!(next.id, 4);
    }

    #[test]
    fn created_at_stamp_has_the_expected_shape() {
        let stamp = created_at_stamp();
        // DD.MM.YYYY HH:MM
        assert_eq!(stamp.len(), 16);
        assert_eq!(&stamp[2..3], ".");
        assert_eq!(&stamp[5..6], ".");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
