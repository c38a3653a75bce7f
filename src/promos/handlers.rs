use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Form, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::{AuthUser, OptionalUser},
    error::AppError,
    promos::dto::PromoForm,
    state::AppState,
    views::{AddPromoPage, EditPromoPage, HomePage, MyPromoCodesPage, PromoRow},
};

pub fn promo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/add_promo", get(add_promo_page).post(add_promo))
        .route("/edit_promo/:id", get(edit_promo_page).post(edit_promo))
        .route("/delete_promo/:id", get(delete_promo))
        .route("/my_promocodes", get(my_promocodes))
}

#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(username): OptionalUser,
) -> Result<HomePage, AppError> {
    let promos = state.promos.list_all()?;
    let rows = promos
        .into_iter()
        .map(|promo| PromoRow {
            mine: username.as_deref() == Some(promo.owner.as_str()),
            promo,
        })
        .collect();
    Ok(HomePage {
        username,
        promos: rows,
    })
}

#[instrument]
pub async fn add_promo_page(AuthUser(username): AuthUser) -> AddPromoPage {
    AddPromoPage {
        username: Some(username),
    }
}

#[instrument(skip(state, form))]
pub async fn add_promo(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Form(form): Form<PromoForm>,
) -> Result<Redirect, AppError> {
    let promo = state.promos.create(form.into(), &username)?;
    info!(promo_id = promo.id, user = %username, "promo code created");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn edit_promo_page(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Path(id): Path<u64>,
) -> Result<EditPromoPage, AppError> {
    let promo = state.promos.find_by_id(id)?;
    if promo.owner != username {
        return Err(AppError::Forbidden);
    }
    Ok(EditPromoPage {
        username: Some(username),
        promo,
    })
}

#[instrument(skip(state, form))]
pub async fn edit_promo(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Path(id): Path<u64>,
    Form(form): Form<PromoForm>,
) -> Result<Redirect, AppError> {
    state.promos.update(id, form.into(), &username)?;
    info!(promo_id = id, user = %username, "promo code updated");
    Ok(Redirect::to("/"))
}

// Deletion stays on GET so links in circulation keep working.
#[instrument(skip(state))]
pub async fn delete_promo(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    state.promos.delete(id, &username)?;
    info!(promo_id = id, user = %username, "promo code deleted");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn my_promocodes(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<MyPromoCodesPage, AppError> {
    let promos = state.promos.list_by_owner(&username)?;
    Ok(MyPromoCodesPage {
        username: Some(username),
        promos,
    })
}
