//! User account endpoints
//!
//! All five endpoints respond with the uniform envelope. Request bodies are
//! decoded leniently: absent fields arrive as empty strings and surface as
//! `missing required field` errors from the service, not decode rejections.

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Envelope, Json};
use crate::domain::user::{ListOrder, User};
use crate::domain::{next_page, prev_page, Page, DEFAULT_PAGE_LIMIT};
use crate::infrastructure::user::{ChangePasswordRequest, RegisterRequest, ResetPasswordRequest};

/// Routes nested under `/users/v1`.
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/reset-password", post(reset_password))
        .route("/change-password", post(change_password))
        .route("/list", get(list))
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub reset_key: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Registration payload: the user plus its one-time reset key.
#[derive(Debug, Serialize)]
pub struct UserWithResetKey {
    pub user: User,
    pub reset_key: String,
}

/// POST /users/v1/register
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Envelope<UserWithResetKey>, ApiError> {
    let (user, reset_key) = state
        .users
        .register(RegisterRequest {
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;

    Ok(Envelope::new(UserWithResetKey { user, reset_key }).with_status(StatusCode::CREATED))
}

/// POST /users/v1/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Envelope<User>, ApiError> {
    let user = state.users.authenticate(&body.email, &body.password).await?;

    Ok(Envelope::new(user))
}

/// POST /users/v1/reset-password
async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Envelope<UserWithResetKey>, ApiError> {
    let (user, reset_key) = state
        .users
        .reset_password(ResetPasswordRequest {
            email: body.email,
            reset_key: body.reset_key,
            new_password: body.new_password,
            confirm_password: body.confirm_password,
        })
        .await?;

    Ok(Envelope::new(UserWithResetKey { user, reset_key }))
}

/// POST /users/v1/change-password
async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordBody>,
) -> Result<Envelope<User>, ApiError> {
    let user = state
        .users
        .change_password(ChangePasswordRequest {
            email: body.email,
            current_password: body.current_password,
            new_password: body.new_password,
            confirm_password: body.confirm_password,
        })
        .await?;

    Ok(Envelope::new(user))
}

/// Window parameters decoded from the list query string.
///
/// Unparsable values silently become the defaults, never a rejection:
/// `limit` falls back to 20 when absent, unparsable or zero, `offset` to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListParams {
    order: ListOrder,
    limit: i64,
    offset: i64,
}

fn parse_list_params(query: &str) -> ListParams {
    let mut order = ListOrder::default();
    let mut limit = 0i64;
    let mut offset = 0i64;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "order" => order = ListOrder::parse(&value),
            "limit" => limit = value.parse().unwrap_or(0),
            "offset" => offset = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    if limit == 0 {
        limit = DEFAULT_PAGE_LIMIT;
    }

    ListParams {
        order,
        limit,
        offset,
    }
}

fn page_link(path: &str, query: &str, page: Page) -> String {
    format!("{}?{}", path, page.with_query(query))
}

/// GET /users/v1/list
async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Envelope<Vec<User>>, ApiError> {
    let query = uri.query().unwrap_or("");
    let params = parse_list_params(query);

    let (users, total) = state
        .users
        .list(params.order, params.limit, params.offset)
        .await?;

    let mut envelope = Envelope::new(users).with_total(total);

    if let Ok(page) = prev_page(total, params.limit, params.offset) {
        envelope = envelope.with_previous(page_link(uri.path(), query, page));
    }
    if let Ok(page) = next_page(total, params.limit, params.offset) {
        envelope = envelope.with_next(page_link(uri.path(), query, page));
    }

    Ok(envelope)
}
