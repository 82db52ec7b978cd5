use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::response::ApiError;

/// The two account families share one table; the kind discriminates them and
/// each keeps its own email namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    User,
    Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Student,
    Admin,
    SuperAdmin,
    PlacementDirector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Student => "student",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::PlacementDirector => "placement_director",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Grant of a catalog module (and a subset of its submodules) to an access
/// account. References are advisory; no foreign key backs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    pub module: String,
    pub submodules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub kind: AccountKind,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Json<Address>>,
    pub role: Role,
    pub gender: Option<Gender>,
    pub dob: Option<Date>,
    pub profile_image: Option<String>,
    pub access: Option<Json<Vec<AccessGrant>>>,
    pub created_by: String,
    pub first_login_pending: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = r#"
    id, kind, email, password_hash, first_name, last_name, user_name, phone,
    address, role, gender, dob, profile_image, access, created_by,
    first_login_pending, created_at
"#;

#[derive(Debug, Default)]
pub struct NewAccount {
    pub kind: Option<AccountKind>,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub role: Option<Role>,
    pub gender: Option<Gender>,
    pub dob: Option<Date>,
    pub profile_image: Option<String>,
    pub access: Option<Vec<AccessGrant>>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub gender: Option<Gender>,
    pub dob: Option<Date>,
    pub profile_image: Option<String>,
    pub access: Option<Vec<AccessGrant>>,
}

impl Account {
    pub async fn find_by_email(
        db: &PgPool,
        kind: AccountKind,
        email: &str,
    ) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM accounts WHERE kind = $1 AND email = $2"
        ))
        .bind(kind)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Account>> {
        let account =
            sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(account)
    }

    pub async fn list(db: &PgPool, kind: AccountKind) -> anyhow::Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM accounts WHERE kind = $1 ORDER BY created_at DESC"
        ))
        .bind(kind)
        .fetch_all(db)
        .await?;
        Ok(accounts)
    }

    pub async fn create(db: &PgPool, new: NewAccount) -> anyhow::Result<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts
                (kind, email, password_hash, first_name, last_name, phone,
                 address, role, gender, dob, profile_image, access)
            VALUES
                (COALESCE($1, 'user'::account_kind), $2, $3, $4, $5, $6, $7,
                 COALESCE($8, 'user'::account_role), $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.kind)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(new.address.map(Json))
        .bind(new.role)
        .bind(new.gender)
        .bind(new.dob)
        .bind(&new.profile_image)
        .bind(new.access.map(Json))
        .fetch_one(db)
        .await?;
        Ok(account)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        changes: AccountChanges,
    ) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts SET
                email         = COALESCE($2, email),
                first_name    = COALESCE($3, first_name),
                last_name     = COALESCE($4, last_name),
                user_name     = COALESCE($5, user_name),
                phone         = COALESCE($6, phone),
                address       = COALESCE($7, address),
                gender        = COALESCE($8, gender),
                dob           = COALESCE($9, dob),
                profile_image = COALESCE($10, profile_image),
                access        = COALESCE($11, access)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.user_name)
        .bind(&changes.phone)
        .bind(changes.address.map(Json))
        .bind(changes.gender)
        .bind(changes.dob)
        .bind(&changes.profile_image)
        .bind(changes.access.map(Json))
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    pub async fn set_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn mark_first_login_done(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE accounts SET first_login_pending = FALSE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Delete the row and return it so the caller can clean up the stored
    /// profile image.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "DELETE FROM accounts WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Exact-match role check against an allow-list; no hierarchy between
    /// roles is modeled.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with_role(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            kind: AccountKind::User,
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            first_name: None,
            last_name: None,
            user_name: None,
            phone: None,
            address: None,
            role,
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
    fn role_gate_permits_listed_roles_only() {
        let admin = account_with_role(Role::Admin);
        assert!(admin.require_role(&[Role::Admin, Role::SuperAdmin]).is_ok());

        let user = account_with_role(Role::User);
        assert!(user.require_role(&[Role::Admin, Role::SuperAdmin]).is_err());
    }

    #[test]
    fn role_gate_has_no_hierarchy() {
        // super_admin is not implicitly granted admin-only routes.
        let super_admin = account_with_role(Role::SuperAdmin);
        assert!(super_admin.require_role(&[Role::Admin]).is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let account = account_with_role(Role::User);
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn roles_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_value(Role::SuperAdmin).unwrap(),
            serde_json::json!("super_admin")
        );
        assert_eq!(
            serde_json::to_value(Role::PlacementDirector).unwrap(),
            serde_json::json!("placement_director")
        );
        assert_eq!(Role::SuperAdmin.as_str(), "super_admin");
    }

    #[test]
    fn access_grants_roundtrip_through_json() {
        let grants = vec![AccessGrant {
            module: "Hiring".into(),
            submodules: vec!["Openings".into(), "Applicants".into()],
        }];
        let json = serde_json::to_string(&grants).unwrap();
        let back: Vec<AccessGrant> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].module, "Hiring");
        assert_eq!(back[0].submodules.len(), 2);
    }
}
