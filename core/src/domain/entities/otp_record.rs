//! One-time passcode record bound to a phone number.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a passcode (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// Outstanding OTP challenge for a phone number
///
/// At most one record exists per phone. The code is secret material: it is
/// never logged and never serialized into API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Phone number in E.164 format, unique key
    pub phone: String,

    /// The 6-digit passcode
    pub code: String,

    /// Verification attempts consumed so far
    pub attempts: u32,

    /// Attempt ceiling for this record
    pub max_attempts: u32,

    /// Instant after which the record is no longer valid
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `phone` - E.164 phone number
    /// * `now` - Creation instant
    /// * `lifetime` - Time until the code expires
    /// * `max_attempts` - Attempt ceiling
    pub fn issue(phone: impl Into<String>, now: DateTime<Utc>, lifetime: Duration, max_attempts: u32) -> Self {
        Self::with_code(phone, generate_code(), now, lifetime, max_attempts)
    }

    /// Creates a record with a known code
    pub fn with_code(
        phone: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            code: code.into(),
            attempts: 0,
            max_attempts,
            expires_at: now + lifetime,
            created_at: now,
            updated_at: now,
        }
    }

    /// Strictly past its expiry instant
    ///
    /// The verifier and the reaper share this criterion.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// All attempts consumed
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Attempts left before the ceiling
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// A resend is refused while more than `cooldown` of the lifetime remains
    pub fn blocks_resend(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        self.expires_at - now > cooldown
    }
}

/// Generates a 6-digit code from the OS CSPRNG
///
/// Each digit is drawn independently and uniformly from 0-9.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
