use rand::Rng;
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::password::{hash_password, verify_password};

pub const RESET_PASSWORD: &str = "RESET_PASSWORD";

const OTP_DIGITS: usize = 6;
/// A code is accepted for one minute after it is generated.
const OTP_VALIDITY: Duration = Duration::minutes(1);
/// Records linger for five minutes before the sweep removes them.
const OTP_RETENTION: Duration = Duration::minutes(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    Verified,
    Expired,
    Mismatch,
}

#[derive(Debug, Clone, FromRow)]
struct OtpRecord {
    otp_hash: String,
    expires_at: OffsetDateTime,
}

/// Produce a fixed-length numeric code. The RNG is injected so tests can
/// supply a deterministic source; the plaintext is only ever emailed.
pub fn new_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..OTP_DIGITS)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Store the hash of a freshly generated code for (account, purpose), and
/// sweep records past the retention window while we are here.
pub async fn persist(
    db: &PgPool,
    account_id: Uuid,
    purpose: &str,
    code: &str,
) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();

    sqlx::query("DELETE FROM otps WHERE created_at < $1")
        .bind(now - OTP_RETENTION)
        .execute(db)
        .await?;

    let otp_hash = hash_password(code)?;
    sqlx::query(
        r#"
        INSERT INTO otps (account_id, otp_hash, purpose, expires_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(account_id)
    .bind(&otp_hash)
    .bind(purpose)
    .bind(now + OTP_VALIDITY)
    .execute(db)
    .await?;

    debug!(%account_id, %purpose, "otp stored");
    Ok(())
}

/// Decide the fate of a submitted code. Mismatch is reported before expiry,
/// so a wrong guess never learns whether a code had lapsed.
fn evaluate(record: Option<&OtpRecord>, candidate: &str, now: OffsetDateTime) -> OtpOutcome {
    let Some(record) = record else {
        return OtpOutcome::Mismatch;
    };
    if !verify_password(candidate, &record.otp_hash).unwrap_or(false) {
        return OtpOutcome::Mismatch;
    }
    if now > record.expires_at {
        return OtpOutcome::Expired;
    }
    OtpOutcome::Verified
}

/// Check a submitted code against the newest record for (account, purpose).
/// A verified code is single-use: success deletes the pair's records.
pub async fn verify(
    db: &PgPool,
    account_id: Uuid,
    purpose: &str,
    candidate: &str,
) -> anyhow::Result<OtpOutcome> {
    let record = sqlx::query_as::<_, OtpRecord>(
        r#"
        SELECT otp_hash, expires_at
        FROM otps
        WHERE account_id = $1 AND purpose = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(account_id)
    .bind(purpose)
    .fetch_optional(db)
    .await?;

    let outcome = evaluate(record.as_ref(), candidate, OffsetDateTime::now_utc());

    if outcome == OtpOutcome::Verified {
        sqlx::query("DELETE FROM otps WHERE account_id = $1 AND purpose = $2")
            .bind(account_id)
            .bind(purpose)
            .execute(db)
            .await?;
        debug!(%account_id, %purpose, "otp verified");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn code_is_six_digits() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = new_code(&mut rng);
        assert_eq!(code.len(), OTP_DIGITS);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn code_is_deterministic_under_seeded_rng() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(new_code(&mut a), new_code(&mut b));
    }

    #[test]
    fn code_hash_verifies_and_rejects_other_codes() {
        let mut rng = StdRng::seed_from_u64(3);
        let code = new_code(&mut rng);
        let hash = hash_password(&code).expect("hash");
        assert!(verify_password(&code, &hash).expect("verify"));
        assert!(!verify_password("000000", &hash).expect("verify"));
    }

    fn record_for(code: &str, expires_at: OffsetDateTime) -> OtpRecord {
        OtpRecord {
            otp_hash: hash_password(code).expect("hash"),
            expires_at,
        }
    }

    #[test]
    fn absent_record_is_a_mismatch() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(evaluate(None, "123456", now), OtpOutcome::Mismatch);
    }

    #[test]
    fn live_code_verifies() {
        let now = OffsetDateTime::now_utc();
        let record = record_for("123456", now + OTP_VALIDITY);
        assert_eq!(evaluate(Some(&record), "123456", now), OtpOutcome::Verified);
    }

    #[test]
    fn right_code_past_its_window_is_expired() {
        let now = OffsetDateTime::now_utc();
        let record = record_for("123456", now - Duration::seconds(1));
        assert_eq!(evaluate(Some(&record), "123456", now), OtpOutcome::Expired);
    }

    #[test]
    fn wrong_code_is_a_mismatch_even_when_the_record_has_expired() {
        // Expiry is only reported for the matching code.
        let now = OffsetDateTime::now_utc();
        let record = record_for("123456", now - Duration::seconds(1));
        assert_eq!(evaluate(Some(&record), "654321", now), OtpOutcome::Mismatch);
    }

    #[test]
    fn code_accepted_exactly_at_the_expiry_instant() {
        let now = OffsetDateTime::now_utc();
        let record = record_for("123456", now);
        assert_eq!(evaluate(Some(&record), "123456", now), OtpOutcome::Verified);
    }
}
