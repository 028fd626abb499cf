use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use super::config::LoginConfig;
use super::cookies;
use super::error::LoginError;
use super::extractor::resolve_identity;
use super::state::AuthState;
use crate::credentials::CredentialStore;
use crate::login::{LoginOrchestrator, LoginOutcome, LoginSettings};
use crate::session::{SessionEstablisher, SessionStore};
use crate::types::LoginAttempt;

/// Create the login router.
///
/// `GET {login_path}` returns the form model (pre-filled username, enabled
/// providers) as JSON; `POST {login_path}` takes a `username`/`password` form.
pub fn login_routes<C, S>(config: LoginConfig, credential_store: C, session_store: S) -> Router
where
    C: CredentialStore,
    S: SessionStore,
{
    let login_path = config.settings.login_path.clone();

    let sessions = SessionEstablisher::new(Arc::new(session_store))
        .with_write_timeout(config.settings.session_write_timeout);
    let orchestrator = LoginOrchestrator::new(Arc::new(credential_store), sessions, config.providers)
        .with_settings(LoginSettings::default().with_app_root(config.settings.app_root.clone()));

    let state = AuthState {
        orchestrator: Arc::new(orchestrator),
        settings: config.settings,
    };

    Router::new()
        .route(
            &login_path,
            get(login_page::<C, S>).post(login_submit::<C, S>),
        )
        .with_state(state)
}

// ── Initial view ───────────────────────────────────────────────────

async fn login_page<C: CredentialStore, S: SessionStore>(
    State(state): State<AuthState<C, S>>,
    jar: PrivateCookieJar,
) -> Result<Response, LoginError> {
    let hint = cookies::get_username_hint(&jar, &state.settings);
    let attempt = LoginAttempt::view().with_username_hint(hint);
    run(&state, jar, attempt).await
}

// ── Submission ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginParams {
    username: Option<String>,
    password: Option<String>,
}

async fn login_submit<C: CredentialStore, S: SessionStore>(
    State(state): State<AuthState<C, S>>,
    jar: PrivateCookieJar,
    Form(params): Form<LoginParams>,
) -> Result<Response, LoginError> {
    let attempt = LoginAttempt::submission(
        params.username.unwrap_or_default(),
        params.password.unwrap_or_default(),
    );
    run(&state, jar, attempt).await
}

// ── Helpers ────────────────────────────────────────────────────────

async fn run<C: CredentialStore, S: SessionStore>(
    state: &AuthState<C, S>,
    jar: PrivateCookieJar,
    attempt: LoginAttempt,
) -> Result<Response, LoginError> {
    let claim = resolve_identity(
        state.orchestrator.session_store().as_ref(),
        &jar,
        &state.settings.session_cookie_name,
    )
    .await?;

    let outcome = state.orchestrator.process(&claim, attempt).await?;

    let response = match outcome {
        LoginOutcome::AlreadyAuthenticated { redirect_to } => {
            (jar, Redirect::to(&redirect_to)).into_response()
        }
        LoginOutcome::Authenticated {
            binding,
            redirect_to,
            ..
        } => {
            let jar = cookies::apply_binding(jar, &binding, &state.settings);
            (jar, Redirect::to(&redirect_to)).into_response()
        }
        LoginOutcome::Rejected { form, binding } => {
            let jar = cookies::apply_binding(jar, &binding, &state.settings);
            (jar, Json(form)).into_response()
        }
        LoginOutcome::ShowForm { form } => (jar, Json(form)).into_response(),
    };

    Ok(response)
}
