use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::accounts::dto::{
    AccountResponse, ForgotResetRequest, ListAccountsResponse, MessageResponse, ProvisionResponse,
    PublicAccount, SignInRequest, SignInResponse, SignUpRequest, VerifyResponse,
};
use crate::accounts::repo::{
    Account, AccountChanges, AccountKind, Address, Gender, NewAccount, Role,
};
use crate::auth::otp::{self, OtpOutcome, RESET_PASSWORD};
use crate::auth::password::{generate_password, hash_password, verify_password};
use crate::auth::session::SESSION_COOKIE;
use crate::auth::token::TokenKeys;
use crate::forms::ParsedForm;
use crate::response::{ApiError, ApiMessage};
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn token_keys(state: &AppState) -> TokenKeys {
    use axum::extract::FromRef;
    TokenKeys::from_ref(state)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

pub(crate) fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// Object key for an uploaded asset, unique per upload instant.
pub(crate) fn asset_key(prefix: &str, file_name: &str) -> String {
    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    format!("{}/{}_{}", prefix.trim_end_matches('/'), millis, file_name)
}

pub(crate) fn reset_password_url(base_url: &str, id: Uuid, token: &str) -> String {
    format!("{}/ResetPassword/{}/{}", base_url.trim_end_matches('/'), id, token)
}

fn reset_link_body(url: &str) -> String {
    format!(
        "Greetings,<br/><br/>Please click <a href=\"{url}\"><b><i>here</i></b></a> to reset \
         your password.<br/><b>Note : </b> Link valid up to 3 days only.<br/><br/>\
         Regards,<i>Medical Tourism Team</i>"
    )
}

fn otp_body(code: &str) -> String {
    format!(
        "Greetings,<br/><br/>Your One Time Password is {code}.<br/>\
         <b>Note : </b> Don't share this OTP with anyone else.<br/><br/>\
         Regards,<i>Medical Tourism Team</i>"
    )
}

fn credentials_body(client_url: &str, label: &str, email: &str, password: &str) -> String {
    format!(
        "<p><strong>Welcome to the MEDTOUR</strong></p>\
         <p>You have been added as a {label}:</p>\
         <p><strong>{label} Email:</strong> {email}</p>\
         <p><strong>Password:</strong> {password}</p>\
         <p>For login, visit <a href=\"{client_url}/signin\">here</a></p>"
    )
}

// --- sign-up / sign-in / logout ---

pub async fn sign_up(
    state: &AppState,
    kind: AccountKind,
    jar: CookieJar,
    mut payload: SignUpRequest,
) -> Result<(StatusCode, CookieJar, Json<MessageResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        return Err(ApiError::Field {
            key: "email".into(),
            value: "Your email address is required".into(),
        });
    }
    if payload.password.is_empty() {
        return Err(ApiError::Field {
            key: "password".into(),
            value: "Your password is required".into(),
        });
    }

    if Account::find_by_email(&state.db, kind, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "sign-up for existing email");
        return Err(ApiError::Duplicate("User already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let account = Account::create(
        &state.db,
        NewAccount {
            kind: Some(kind),
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            address: payload.address,
            ..Default::default()
        },
    )
    .await?;

    let token = token_keys(state).sign(account.id)?;
    info!(account_id = %account.id, email = %account.email, "account signed up");

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(MessageResponse {
            message: ApiMessage::success("User signed up successfully"),
        }),
    ))
}

/// Unknown email and wrong password collapse to one indistinguishable
/// rejection; the response never reveals which check failed.
fn check_credentials<'a>(
    account: Option<&'a Account>,
    password: &str,
) -> Result<&'a Account, ApiError> {
    let incorrect = || ApiError::Validation("Incorrect password or email".into());
    let account = account.ok_or_else(incorrect)?;
    if !verify_password(password, &account.password_hash).unwrap_or(false) {
        warn!(account_id = %account.id, "sign-in with wrong password");
        return Err(incorrect());
    }
    Ok(account)
}

pub async fn sign_in(
    state: &AppState,
    kind: AccountKind,
    jar: CookieJar,
    payload: SignInRequest,
) -> Result<(StatusCode, CookieJar, Json<SignInResponse>), ApiError> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e.trim().to_lowercase(), p),
        _ => return Err(ApiError::Validation("All fields are required".into())),
    };

    let found = Account::find_by_email(&state.db, kind, &email).await?;
    let account = check_credentials(found.as_ref(), &password)?.clone();

    let first_login = account.first_login_pending;
    if first_login {
        Account::mark_first_login_done(&state.db, account.id).await?;
    }

    let token = token_keys(state).sign(account.id)?;
    let user =
        PublicAccount::from_account(&account, state.storage.as_ref()).with_first_login(first_login);

    info!(account_id = %account.id, role = account.role.as_str(), "signed in");
    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(SignInResponse {
            message: ApiMessage::success(format!(
                "{} logged in successfully",
                account.role.as_str()
            )),
            user,
        }),
    ))
}

pub fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        clear_session(jar),
        Json(MessageResponse {
            message: ApiMessage::success("Logout successful"),
        }),
    )
}

// --- session-backed reads ---

pub fn verify_session(state: &AppState, account: &Account) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        user: PublicAccount::from_account(account, state.storage.as_ref()),
    })
}

pub async fn list_accounts(
    state: &AppState,
    kind: AccountKind,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let accounts = Account::list(&state.db, kind).await?;
    if accounts.is_empty() {
        return Err(ApiError::NotFound("No users found".into()));
    }
    let users = accounts
        .iter()
        .map(|a| PublicAccount::from_account(a, state.storage.as_ref()))
        .collect();
    Ok(Json(ListAccountsResponse {
        message: ApiMessage::success("User section get All data"),
        users,
    }))
}

async fn find_in_family(
    state: &AppState,
    kind: AccountKind,
    id: Uuid,
) -> Result<Option<Account>, ApiError> {
    let account = Account::find_by_id(&state.db, id).await?;
    Ok(account.filter(|a| a.kind == kind))
}

pub async fn get_account(
    state: &AppState,
    kind: AccountKind,
    id: Uuid,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = find_in_family(state, kind, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(AccountResponse {
        message: ApiMessage::success("User section Id based get the data"),
        user: PublicAccount::from_account(&account, state.storage.as_ref()),
    }))
}

// --- forgot-password link flow ---

pub async fn forgot_password(
    state: &AppState,
    kind: AccountKind,
    email: Option<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = email.filter(|e| !e.is_empty()).ok_or(ApiError::Field {
        key: "email".into(),
        value: "Email is required".into(),
    })?;

    let account = Account::find_by_email(&state.db, kind, &email.trim().to_lowercase())
        .await?
        .ok_or_else(|| ApiError::Validation("User with given email does not exist".into()))?;

    let token = token_keys(state).sign(account.id)?;
    let url = reset_password_url(&state.config.base_url, account.id, &token);

    state
        .mailer
        .send(
            &account.email,
            "Reset Password - Medical Tourism",
            &reset_link_body(&url),
        )
        .await
        .map_err(|e| {
            error!(error = ?e, account_id = %account.id, "reset link email failed");
            ApiError::Email("Couldn't send password reset link".into())
        })?;

    info!(account_id = %account.id, "reset link sent");
    Ok(Json(MessageResponse {
        message: ApiMessage::success("Password reset link sent to your email"),
    }))
}

pub async fn verify_reset_link(
    state: &AppState,
    kind: AccountKind,
    id: Uuid,
    token: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    let invalid = || ApiError::Validation("Invalid link".into());

    find_in_family(state, kind, id).await?.ok_or_else(invalid)?;
    let claims = token_keys(state).verify(token).map_err(|_| invalid())?;
    if claims.sub != id {
        return Err(invalid());
    }

    Ok(Json(MessageResponse {
        message: ApiMessage::success("valid url"),
    }))
}

/// Accepts the account id and new password straight from the request body;
/// the reset token is not re-checked at this final step.
pub async fn forgot_reset(
    state: &AppState,
    kind: AccountKind,
    payload: ForgotResetRequest,
) -> Result<Json<MessageResponse>, ApiError> {
    let account = find_in_family(state, kind, payload.id)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid link".into()))?;

    let password_hash = hash_password(&payload.password)?;
    Account::set_password(&state.db, account.id, &password_hash).await?;

    info!(account_id = %account.id, "password reset via link");
    Ok(Json(MessageResponse {
        message: ApiMessage::success("Password reset successfully"),
    }))
}

// --- authenticated OTP flow ---

pub async fn send_reset_otp(
    state: &AppState,
    account: &Account,
) -> Result<Json<MessageResponse>, ApiError> {
    let code = {
        let mut rng = rand::thread_rng();
        otp::new_code(&mut rng)
    };
    otp::persist(&state.db, account.id, RESET_PASSWORD, &code).await?;

    state
        .mailer
        .send(
            &account.email,
            "OTP - Reset Password - Medical Tourism",
            &otp_body(&code),
        )
        .await
        .map_err(|e| {
            error!(error = ?e, account_id = %account.id, "otp email failed");
            ApiError::Email("Couldn't send OTP".into())
        })?;

    info!(account_id = %account.id, "reset otp sent");
    Ok(Json(MessageResponse {
        message: ApiMessage::success("OTP sent"),
    }))
}

pub async fn verify_reset_otp(
    state: &AppState,
    account: &Account,
    candidate: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    match otp::verify(&state.db, account.id, RESET_PASSWORD, candidate).await? {
        OtpOutcome::Verified => Ok(Json(MessageResponse {
            message: ApiMessage::success("OTP verified"),
        })),
        OtpOutcome::Expired => Err(ApiError::Validation("OTP expired".into())),
        OtpOutcome::Mismatch => Err(ApiError::Validation("Wrong OTP".into())),
    }
}

pub async fn reset_password(
    state: &AppState,
    account: &Account,
    password: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    let password_hash = hash_password(password)?;
    Account::set_password(&state.db, account.id, &password_hash).await?;
    info!(account_id = %account.id, "password reset");
    Ok(Json(MessageResponse {
        message: ApiMessage::success("Password reset successfully"),
    }))
}

// --- provisioning (admins, super-admins, access users) ---

pub struct ProvisionSpec {
    pub kind: AccountKind,
    /// Role forced by the route; when absent the form may choose one and the
    /// family default applies.
    pub forced_role: Option<Role>,
    pub asset_prefix: &'static str,
    pub image_cap: usize,
    pub image_label: &'static str,
    /// Provisioned accounts either submit a password or get a generated one.
    pub generate_password: bool,
    pub label: &'static str,
}

impl ProvisionSpec {
    pub const ADMIN: ProvisionSpec = ProvisionSpec {
        kind: AccountKind::User,
        forced_role: Some(Role::Admin),
        asset_prefix: "users/admin",
        image_cap: 3 * 1024 * 1024,
        image_label: "Profile picture",
        generate_password: false,
        label: "Admin",
    };

    pub const SUPER_ADMIN: ProvisionSpec = ProvisionSpec {
        kind: AccountKind::User,
        forced_role: Some(Role::SuperAdmin),
        asset_prefix: "users/super_admin",
        image_cap: 3 * 1024 * 1024,
        image_label: "Profile picture",
        generate_password: false,
        label: "Super Admin",
    };

    pub const ACCESS_USER: ProvisionSpec = ProvisionSpec {
        kind: AccountKind::Access,
        forced_role: None,
        asset_prefix: "access_user/profile",
        image_cap: 5 * 1024 * 1024,
        image_label: "Image",
        generate_password: true,
        label: "User",
    };
}

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ApiError::Validation("Invalid role".into()))
}

fn parse_gender(raw: &str) -> Result<Gender, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ApiError::Validation("Invalid gender".into()))
}

fn parse_dob(raw: &str) -> Result<time::Date, ApiError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(raw, &format)
        .map_err(|_| ApiError::Validation("Invalid date of birth".into()))
}

pub async fn provision(
    state: &AppState,
    spec: ProvisionSpec,
    form: ParsedForm,
) -> Result<(StatusCode, Json<ProvisionResponse>), ApiError> {
    let email = form.required("email")?.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Field {
            key: "email".into(),
            value: "Your email address is required".into(),
        });
    }

    if Account::find_by_email(&state.db, spec.kind, &email)
        .await?
        .is_some()
    {
        return Err(ApiError::Duplicate(format!("{} already exists", spec.label)));
    }

    let file = form.file.as_ref().ok_or_else(|| {
        ApiError::Validation(format!("{} is required", spec.image_label))
    })?;
    if file.size() > spec.image_cap {
        return Err(ApiError::Validation(format!(
            "{} size exceeds the {}MB limit",
            spec.image_label,
            spec.image_cap / (1024 * 1024)
        )));
    }

    let password = if spec.generate_password {
        let mut rng = rand::thread_rng();
        generate_password(&mut rng)
    } else {
        form.required("password")?.to_string()
    };

    let role = match spec.forced_role {
        Some(role) => Some(role),
        None => match form.text("role") {
            Some(raw) => Some(parse_role(raw)?),
            None => Some(Role::Student),
        },
    };

    let gender = form.text("gender").map(parse_gender).transpose()?;
    let dob = form.text("dob").map(parse_dob).transpose()?;
    let address: Option<Address> = form.json("address")?;
    let access = form.json("access")?;

    let key = asset_key(spec.asset_prefix, &file.file_name);
    state
        .storage
        .put_object(&key, file.bytes.clone(), &file.content_type)
        .await
        .map_err(|e| {
            error!(error = ?e, "asset upload failed");
            ApiError::Internal(e)
        })?;

    let password_hash = hash_password(&password)?;
    let account = Account::create(
        &state.db,
        NewAccount {
            kind: Some(spec.kind),
            email: email.clone(),
            password_hash,
            first_name: form.text("firstName").map(String::from),
            last_name: form.text("lastName").map(String::from),
            phone: form.text("phone").map(String::from),
            address,
            role,
            gender,
            dob,
            profile_image: Some(key),
            access,
        },
    )
    .await?;

    let token = token_keys(state).sign(account.id)?;

    // The account stays even if the credential email fails; the caller sees
    // the partial failure and retries the email out of band.
    state
        .mailer
        .send(
            &email,
            &format!("Your New {} Password", spec.label),
            &credentials_body(&state.config.client_url, spec.label, &email, &password),
        )
        .await
        .map_err(|e| {
            error!(error = ?e, account_id = %account.id, "credentials email failed");
            ApiError::Email("Email sending failed".into())
        })?;

    info!(account_id = %account.id, role = account.role.as_str(), "account provisioned");
    Ok((
        StatusCode::CREATED,
        Json(ProvisionResponse {
            message: ApiMessage::success(format!("{} registered successfully", spec.label)),
            token,
        }),
    ))
}

// --- update / delete ---

pub struct UpdateSpec {
    pub kind: AccountKind,
    pub asset_prefix: &'static str,
    pub image_cap: usize,
    pub image_label: &'static str,
    pub label: &'static str,
}

impl UpdateSpec {
    pub const USER: UpdateSpec = UpdateSpec {
        kind: AccountKind::User,
        asset_prefix: "users",
        image_cap: 3 * 1024 * 1024,
        image_label: "Profile picture",
        label: "User",
    };
    pub const ADMIN: UpdateSpec = UpdateSpec {
        kind: AccountKind::User,
        asset_prefix: "users/admin",
        image_cap: 3 * 1024 * 1024,
        image_label: "Profile picture",
        label: "Admin",
    };
    pub const SUPER_ADMIN: UpdateSpec = UpdateSpec {
        kind: AccountKind::User,
        asset_prefix: "users/super_admin",
        image_cap: 3 * 1024 * 1024,
        image_label: "Profile picture",
        label: "Super Admin",
    };
    pub const ACCESS_USER: UpdateSpec = UpdateSpec {
        kind: AccountKind::Access,
        asset_prefix: "access_user/profile",
        image_cap: 5 * 1024 * 1024,
        image_label: "Image",
        label: "User",
    };
}

pub async fn update_account(
    state: &AppState,
    spec: UpdateSpec,
    id: Uuid,
    form: ParsedForm,
) -> Result<Json<AccountResponse>, ApiError> {
    let existing = find_in_family(state, spec.kind, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", spec.label)))?;

    let mut profile_image = None;
    if let Some(file) = form.file.as_ref() {
        if file.size() > spec.image_cap {
            return Err(ApiError::Validation(format!(
                "{} size exceeds the {}MB limit",
                spec.image_label,
                spec.image_cap / (1024 * 1024)
            )));
        }

        // Replace the stored asset; a failed delete of the old object is
        // logged but does not interrupt the update.
        if let Some(old_key) = existing.profile_image.as_deref() {
            if let Err(e) = state.storage.delete_object(old_key).await {
                warn!(error = ?e, %old_key, "failed to delete replaced asset");
            }
        }

        let key = asset_key(spec.asset_prefix, &file.file_name);
        state
            .storage
            .put_object(&key, file.bytes.clone(), &file.content_type)
            .await
            .map_err(ApiError::Internal)?;
        profile_image = Some(key);
    }

    let changes = AccountChanges {
        email: form
            .text("email")
            .map(|e| e.trim().to_lowercase()),
        first_name: form.text("firstName").map(String::from),
        last_name: form.text("lastName").map(String::from),
        user_name: form.text("userName").map(String::from),
        phone: form.text("phone").map(String::from),
        address: form.json("address")?,
        gender: form.text("gender").map(parse_gender).transpose()?,
        dob: form.text("dob").map(parse_dob).transpose()?,
        profile_image,
        access: form.json("access")?,
    };

    let updated = Account::update(&state.db, id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", spec.label)))?;

    info!(account_id = %id, "account updated");
    Ok(Json(AccountResponse {
        message: ApiMessage::success(format!("{} updated successfully", spec.label)),
        user: PublicAccount::from_account(&updated, state.storage.as_ref()),
    }))
}

pub async fn delete_account(
    state: &AppState,
    kind: AccountKind,
    id: Uuid,
    label: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    if find_in_family(state, kind, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("{} not found", label)));
    }

    let deleted = Account::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", label)))?;

    if let Some(key) = deleted.profile_image.as_deref() {
        if let Err(e) = state.storage.delete_object(key).await {
            warn!(error = ?e, %key, "failed to delete profile image");
        }
    }

    info!(account_id = %id, "account deleted");
    Ok(Json(MessageResponse {
        message: ApiMessage::success(format!("{} deleted successfully", label)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn reset_url_has_expected_shape() {
        let id = Uuid::nil();
        let url = reset_password_url("http://localhost:3000/", id, "tok123");
        assert_eq!(
            url,
            format!("http://localhost:3000/ResetPassword/{}/tok123", id)
        );
    }

    #[test]
    fn asset_keys_are_prefixed_and_keep_the_file_name() {
        let key = asset_key("users/admin/", "me.png");
        assert!(key.starts_with("users/admin/"));
        assert!(key.ends_with("_me.png"));
    }

    #[test]
    fn provision_specs_match_the_family_limits() {
        assert_eq!(ProvisionSpec::ADMIN.image_cap, 3 * 1024 * 1024);
        assert_eq!(ProvisionSpec::ACCESS_USER.image_cap, 5 * 1024 * 1024);
        assert!(ProvisionSpec::ACCESS_USER.generate_password);
        assert_eq!(ProvisionSpec::SUPER_ADMIN.forced_role, Some(Role::SuperAdmin));
        assert_eq!(ProvisionSpec::ACCESS_USER.kind, AccountKind::Access);
    }

    #[test]
    fn role_and_gender_parse_from_snake_case_fields() {
        assert_eq!(parse_role("placement_director").unwrap(), Role::PlacementDirector);
        assert_eq!(parse_role("student").unwrap(), Role::Student);
        assert!(parse_role("owner").is_err());
        assert_eq!(parse_gender("female").unwrap(), Gender::Female);
        assert!(parse_gender("n/a").is_err());
    }

    #[test]
    fn dob_parses_iso_dates_only() {
        assert!(parse_dob("1999-12-31").is_ok());
        assert!(parse_dob("31/12/1999").is_err());
    }

    #[test]
    fn credential_email_contains_the_issued_password_and_login_link() {
        let body = credentials_body("https://app.test", "Admin", "a@x.com", "Secr3tPw");
        assert!(body.contains("Secr3tPw"));
        assert!(body.contains("a@x.com"));
        assert!(body.contains("https://app.test/signin"));
    }

    #[test]
    fn reset_link_email_embeds_the_url() {
        let body = reset_link_body("http://x/ResetPassword/1/tok");
        assert!(body.contains("http://x/ResetPassword/1/tok"));
    }

    fn account_with_password(plain: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            kind: AccountKind::User,
            email: "a@x.com".into(),
            password_hash: hash_password(plain).expect("hash"),
            first_name: None,
            last_name: None,
            user_name: None,
            phone: None,
            address: None,
            role: Role::User,
            gender: None,
            dob: None,
            profile_image: None,
            access: None,
            created_by: "self".into(),
            first_login_pending: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn unknown_email_and_wrong_password_are_indistinguishable() {
        let account = account_with_password("right-password");

        let unknown_email = check_credentials(None, "whatever").unwrap_err();
        let wrong_password = check_credentials(Some(&account), "wrong-password").unwrap_err();

        assert!(matches!(unknown_email, ApiError::Validation(_)));
        assert!(matches!(wrong_password, ApiError::Validation(_)));
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
        assert_eq!(unknown_email.to_string(), "Incorrect password or email");
    }

    #[test]
    fn stored_hash_from_sign_up_accepts_the_original_password() {
        let account = account_with_password("Secur3P@ss");
        let checked = check_credentials(Some(&account), "Secur3P@ss").expect("credentials");
        assert_eq!(checked.id, account.id);
    }
}
