use askama::Template;

use crate::promos::repo::PromoCode;

/// A listing row plus whether the current user owns it; owners get edit and
/// delete links on the shared listing.
pub struct PromoRow {
    pub promo: PromoCode,
    pub mine: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub username: Option<String>,
    pub promos: Vec<PromoRow>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub username: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub username: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "add_promo.html")]
pub struct AddPromoPage {
    pub username: Option<String>,
}

#[derive(Template)]
#[template(path = "edit_promo.html")]
pub struct EditPromoPage {
    pub username: Option<String>,
    pub promo: PromoCode,
}

#[derive(Template)]
#[template(path = "my_promocodes.html")]
pub struct MyPromoCodesPage {
    pub username: Option<String>,
    pub promos: Vec<PromoCode>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub username: Option<String>,
    pub message: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub username: Option<String>,
}
