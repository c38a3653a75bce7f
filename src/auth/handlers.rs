use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        extractors::SESSION_COOKIE,
    },
    error::AppError,
    state::AppState,
    views::{LoginPage, RegisterPage},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

#[instrument]
pub async fn register_page() -> RegisterPage {
    RegisterPage {
        username: None,
        error: None,
    }
}

#[instrument(skip(state, jar, form))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match state.users.register(&form.username, &form.password) {
        Ok(()) => {
            info!(user = %form.username, "user registered");
            let jar = jar.add(session_cookie(form.username));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::DuplicateUser) => {
            warn!(user = %form.username, "registration rejected, username taken");
            Ok(RegisterPage {
                username: None,
                error: Some(AppError::DuplicateUser.to_string()),
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument]
pub async fn login_page() -> LoginPage {
    LoginPage {
        username: None,
        error: None,
    }
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.users.authenticate(&form.username, &form.password) {
        Ok(()) => {
            info!(user = %form.username, "user logged in");
            let jar = jar.add(session_cookie(form.username));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            warn!(user = %form.username, "login rejected");
            Ok(LoginPage {
                username: None,
                error: Some(AppError::InvalidCredentials.to_string()),
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/"))
}

// Site-wide identity cookie. No expiry and no flags, per the trust model.
fn session_cookie(username: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, username)).path("/").build()
}
