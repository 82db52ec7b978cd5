use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;
use uuid::Uuid;

use crate::accounts::dto::{
    AccountResponse, ForgotPasswordRequest, ForgotResetRequest, ListAccountsResponse,
    MessageResponse, ProvisionResponse, ResetPasswordRequest, SignInRequest, SignInResponse,
    SignUpRequest, VerifyOtpRequest, VerifyResponse,
};
use crate::accounts::repo::{AccountKind, Role};
use crate::accounts::workflows::{self, ProvisionSpec, UpdateSpec};
use crate::auth::session::Session;
use crate::forms::ParsedForm;
use crate::response::ApiError;
use crate::state::AppState;

// --- primary account family ---

#[instrument(skip(state, jar, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, CookieJar, Json<MessageResponse>), ApiError> {
    workflows::sign_up(&state, AccountKind::User, jar, payload).await
}

#[instrument(skip(state, jar, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<(StatusCode, CookieJar, Json<SignInResponse>), ApiError> {
    workflows::sign_in(&state, AccountKind::User, jar, payload).await
}

#[instrument(skip_all)]
pub async fn logout(
    Session(_account): Session,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    workflows::logout(jar)
}

#[instrument(skip(state, account))]
pub async fn get_users(
    State(state): State<AppState>,
    Session(account): Session,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    account.require_role(&[Role::Admin, Role::SuperAdmin])?;
    workflows::list_accounts(&state, AccountKind::User).await
}

#[instrument(skip(state, _account))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Session(_account): Session,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, ApiError> {
    workflows::get_account(&state, AccountKind::User, id).await
}

#[instrument(skip(state, mp))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<AccountResponse>, ApiError> {
    let form = ParsedForm::read(mp).await?;
    workflows::update_account(&state, UpdateSpec::USER, user_id, form).await
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::forgot_password(&state, AccountKind::User, payload.email).await
}

#[instrument(skip(state, token))]
pub async fn verify_reset_link(
    State(state): State<AppState>,
    Path((id, token)): Path<(Uuid, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::verify_reset_link(&state, AccountKind::User, id, &token).await
}

#[instrument(skip(state, payload))]
pub async fn forgot_reset(
    State(state): State<AppState>,
    Path((_id, _token)): Path<(Uuid, String)>,
    Json(payload): Json<ForgotResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::forgot_reset(&state, AccountKind::User, payload).await
}

#[instrument(skip(state, account))]
pub async fn send_reset_otp(
    State(state): State<AppState>,
    Session(account): Session,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::send_reset_otp(&state, &account).await
}

#[instrument(skip(state, account, payload))]
pub async fn verify_reset_otp(
    State(state): State<AppState>,
    Session(account): Session,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::verify_reset_otp(&state, &account, &payload.otp).await
}

#[instrument(skip(state, account, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Session(account): Session,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::reset_password(&state, &account, &payload.password).await
}

#[instrument(skip(state, account))]
pub async fn user_verify(
    State(state): State<AppState>,
    Session(account): Session,
) -> Json<VerifyResponse> {
    workflows::verify_session(&state, &account)
}

// --- admin / super-admin provisioning ---

#[instrument(skip(state, mp))]
pub async fn create_admin(
    State(state): State<AppState>,
    mp: Multipart,
) -> Result<(StatusCode, Json<ProvisionResponse>), ApiError> {
    let form = ParsedForm::read(mp).await?;
    workflows::provision(&state, ProvisionSpec::ADMIN, form).await
}

#[instrument(skip(state, account, mp))]
pub async fn update_admin(
    State(state): State<AppState>,
    Session(account): Session,
    Path(admin_id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<AccountResponse>, ApiError> {
    account.require_role(&[Role::SuperAdmin])?;
    let form = ParsedForm::read(mp).await?;
    workflows::update_account(&state, UpdateSpec::ADMIN, admin_id, form).await
}

#[instrument(skip(state, account))]
pub async fn delete_admin(
    State(state): State<AppState>,
    Session(account): Session,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    account.require_role(&[Role::SuperAdmin])?;
    workflows::delete_account(&state, AccountKind::User, id, "Admin").await
}

#[instrument(skip(state, account, mp))]
pub async fn create_super_admin(
    State(state): State<AppState>,
    Session(account): Session,
    mp: Multipart,
) -> Result<(StatusCode, Json<ProvisionResponse>), ApiError> {
    account.require_role(&[Role::SuperAdmin])?;
    let form = ParsedForm::read(mp).await?;
    workflows::provision(&state, ProvisionSpec::SUPER_ADMIN, form).await
}

#[instrument(skip(state, account, mp))]
pub async fn update_super_admin(
    State(state): State<AppState>,
    Session(account): Session,
    Path(super_admin_id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<AccountResponse>, ApiError> {
    account.require_role(&[Role::SuperAdmin])?;
    let form = ParsedForm::read(mp).await?;
    workflows::update_account(&state, UpdateSpec::SUPER_ADMIN, super_admin_id, form).await
}

#[instrument(skip(state, account))]
pub async fn delete_super_admin(
    State(state): State<AppState>,
    Session(account): Session,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    account.require_role(&[Role::SuperAdmin])?;
    workflows::delete_account(&state, AccountKind::User, id, "Super Admin").await
}

// --- access-user family ---

#[instrument(skip(state, mp))]
pub async fn create_access_user(
    State(state): State<AppState>,
    mp: Multipart,
) -> Result<(StatusCode, Json<ProvisionResponse>), ApiError> {
    let form = ParsedForm::read(mp).await?;
    workflows::provision(&state, ProvisionSpec::ACCESS_USER, form).await
}

#[instrument(skip(state, jar, payload))]
pub async fn access_sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<(StatusCode, CookieJar, Json<SignInResponse>), ApiError> {
    workflows::sign_in(&state, AccountKind::Access, jar, payload).await
}

#[instrument(skip(state, account))]
pub async fn access_verify(
    State(state): State<AppState>,
    Session(account): Session,
) -> Json<VerifyResponse> {
    workflows::verify_session(&state, &account)
}

#[instrument(skip(state))]
pub async fn get_access_users(
    State(state): State<AppState>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    workflows::list_accounts(&state, AccountKind::Access).await
}

#[instrument(skip(state))]
pub async fn get_access_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, ApiError> {
    workflows::get_account(&state, AccountKind::Access, id).await
}

#[instrument(skip(state, mp))]
pub async fn update_access_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<AccountResponse>, ApiError> {
    let form = ParsedForm::read(mp).await?;
    workflows::update_account(&state, UpdateSpec::ACCESS_USER, user_id, form).await
}

#[instrument(skip(state))]
pub async fn delete_access_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::delete_account(&state, AccountKind::Access, user_id, "User").await
}

#[instrument(skip(state, payload))]
pub async fn access_forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::forgot_password(&state, AccountKind::Access, payload.email).await
}

#[instrument(skip(state, token))]
pub async fn access_verify_reset_link(
    State(state): State<AppState>,
    Path((id, token)): Path<(Uuid, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::verify_reset_link(&state, AccountKind::Access, id, &token).await
}

#[instrument(skip(state, payload))]
pub async fn access_forgot_reset(
    State(state): State<AppState>,
    Path((_id, _token)): Path<(Uuid, String)>,
    Json(payload): Json<ForgotResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflows::forgot_reset(&state, AccountKind::Access, payload).await
}
