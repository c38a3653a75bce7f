use serde::Deserialize;

use crate::promos::repo::PromoFields;

/// Form body for adding or editing a promo code. A missing description and an
/// empty submission both land as "".
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    pub code: String,
    pub shop: String,
    pub discount: String,
    #[serde(default)]
    pub description: String,
}

impl From<PromoForm> for PromoFields {
    fn from(form: PromoForm) -> Self {
        Self {
            code: form.code,
            shop: form.shop,
            discount: form.discount,
            description: form.description,
        }
    }
}
