//! Unit tests for the OTP record entity

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::{generate_code, OtpRecord, CODE_LENGTH, MAX_ATTEMPTS};

#[test]
fn test_issue_sets_lifetime_and_counters() {
    let now = Utc::now();
    let record = OtpRecord::issue("+15551230000", now, Duration::minutes(5), MAX_ATTEMPTS);

    assert_eq!(record.phone, "+15551230000");
    assert_eq!(record.code.len(), CODE_LENGTH);
    assert_eq!(record.attempts, 0);
    assert_eq!(record.max_attempts, 3);
    assert_eq!(record.expires_at, now + Duration::minutes(5));
    assert_eq!(record.remaining_attempts(), 3);
}

#[test]
fn test_generate_code_format() {
    for _ in 0..200 {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_generate_code_digit_distribution_is_uniform() {
    let mut counts = [0u64; 10];
    let codes = 10_000;
    for _ in 0..codes {
        for b in generate_code().bytes() {
            counts[(b - b'0') as usize] += 1;
        }
    }

    let expected = (codes * CODE_LENGTH) as f64 / 10.0;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // 9 degrees of freedom; 40 is far past the 0.9999 quantile
    assert!(chi_square < 40.0, "chi-square {} with counts {:?}", chi_square, counts);
}

#[test]
fn test_expiry_is_strict() {
    let now = Utc::now();
    let record = OtpRecord::with_code("+15551230000", "123456", now, Duration::minutes(5), 3);

    assert!(!record.is_expired_at(record.expires_at));
    assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
}

#[test]
fn test_resend_blocked_only_inside_cooldown() {
    let now = Utc::now();
    let record = OtpRecord::with_code("+15551230000", "123456", now, Duration::minutes(5), 3);
    let cooldown = Duration::minutes(2);

    assert!(record.blocks_resend(now, cooldown));
    assert!(record.blocks_resend(now + Duration::seconds(179), cooldown));
    // exactly 2 minutes left is no longer "more than" the cooldown
    assert!(!record.blocks_resend(now + Duration::minutes(3), cooldown));
}

#[test]
fn test_exhaustion() {
    let now = Utc::now();
    let mut record = OtpRecord::with_code("+15551230000", "123456", now, Duration::minutes(5), 3);
    record.attempts = 3;

    assert!(record.is_exhausted());
    assert_eq!(record.remaining_attempts(), 0);
}
