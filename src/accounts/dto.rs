use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::repo::{AccessGrant, Account, Address, Role};
use crate::response::ApiMessage;
use crate::storage::StorageClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Final step of the forgot-password flow; carries the account id directly,
/// as the reset page submits it from the link.
#[derive(Debug, Deserialize)]
pub struct ForgotResetRequest {
    pub id: Uuid,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Account view returned to clients; never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Vec<AccessGrant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_time_login_done: Option<bool>,
}

impl PublicAccount {
    pub fn from_account(account: &Account, storage: &dyn StorageClient) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            phone: account.phone.clone(),
            address: account.address.as_ref().map(|a| a.0.clone()),
            role: account.role,
            access: account.access.as_ref().map(|a| a.0.clone()),
            image: account
                .profile_image
                .as_deref()
                .map(|key| storage.public_url(key)),
            first_time_login_done: None,
        }
    }

    pub fn with_first_login(mut self, pending: bool) -> Self {
        self.first_time_login_done = Some(pending);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub message: Vec<ApiMessage>,
    pub user: PublicAccount,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: PublicAccount,
}

#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
    pub message: Vec<ApiMessage>,
    #[serde(rename = "Users")]
    pub users: Vec<PublicAccount>,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: Vec<ApiMessage>,
    pub user: PublicAccount,
}

/// Provisioning responds with the freshly signed token beside the envelope.
#[derive(Debug, Serialize)]
pub struct ProvisionResponse {
    pub message: Vec<ApiMessage>,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::repo::AccountKind;
    use sqlx::types::Json;
    use time::OffsetDateTime;

    struct UrlOnly;
    #[async_trait::async_trait]
    impl StorageClient for UrlOnly {
        async fn put_object(
            &self,
            _k: &str,
            _b: bytes::Bytes,
            _ct: &str,
        ) -> anyhow::Result<()> {
            Ok(())
        }
        async fn delete_object(&self, _k: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn public_url(&self, key: &str) -> String {
            format!("https://assets.test/{}", key)
        }
    }

    fn sample_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            kind: AccountKind::Access,
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            first_name: Some("Asha".into()),
            last_name: None,
            user_name: None,
            phone: None,
            address: Some(Json(Address {
                city: Some("Pune".into()),
                state: None,
                country: Some("IN".into()),
            })),
            role: Role::Student,
            gender: None,
            dob: None,
            profile_image: Some("access_user/profile/1_a.png".into()),
            access: Some(Json(vec![AccessGrant {
                module: "Hiring".into(),
                submodules: vec!["Openings".into()],
            }])),
            created_by: "self".into(),
            first_login_pending: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn public_view_carries_no_password_and_resolves_image_url() {
        let view = PublicAccount::from_account(&sample_account(), &UrlOnly);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(
            json["image"],
            "https://assets.test/access_user/profile/1_a.png"
        );
        assert_eq!(json["role"], "student");
        assert_eq!(json["address"]["city"], "Pune");
        // Not part of the view unless a sign-in sets it.
        assert!(json.get("firstTimeLoginDone").is_none());
    }

    #[test]
    fn sign_in_view_reports_pre_flip_first_login_flag() {
        let view =
            PublicAccount::from_account(&sample_account(), &UrlOnly).with_first_login(true);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["firstTimeLoginDone"], true);
    }
}
