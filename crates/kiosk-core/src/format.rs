//! Display formatting and kiosk URL helpers.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use url::Url;
use uuid::Uuid;

use crate::error::UrlParamError;
use crate::money::Money;

/// Czech abbreviated month names, January first.
const MONTHS_SHORT_CS: [&str; 12] = [
    "led", "úno", "bře", "dub", "kvě", "čvn", "čvc", "srp", "zář", "říj", "lis", "pro",
];

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// =============================================================================
// Prices & Dates
// =============================================================================

/// Formats a CZK amount, e.g. `1 234,50 Kč`.
pub fn format_price(price: f64) -> String {
    Money::from_czk_f64(price).to_string()
}

/// Formats a timestamp the way the admin tables show it,
/// e.g. `19. říj 2026 14:05`.
///
/// The date is rendered in the time zone it carries.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    // month0() is always in 0..12.
    let month = MONTHS_SHORT_CS[date.month0() as usize];
    format!(
        "{}. {} {} {:02}:{:02}",
        date.day(),
        month,
        date.year(),
        date.hour(),
        date.minute()
    )
}

// =============================================================================
// Identifiers
// =============================================================================

/// Client-side payment id: `pay-{epoch millis}-{9 base36 chars}`.
pub fn generate_payment_id() -> String {
    generate_payment_id_at(Utc::now())
}

pub fn generate_payment_id_at(now: DateTime<Utc>) -> String {
    format!("pay-{}-{}", now.timestamp_millis(), random_base36(9))
}

/// `len` random lowercase base36 characters (at most 24).
pub fn random_base36(len: usize) -> String {
    let mut random = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(len);
    for _ in 0..len.min(24) {
        out.push(BASE36[(random % 36) as usize] as char);
        random /= 36;
    }
    out
}

// =============================================================================
// Kiosk URL Parameters
// =============================================================================

/// Reads the kiosk id from the `kioskId` query parameter of the kiosk page.
///
/// Like the kiosk app, only the leading integer is taken (`"3abc"` → 3).
pub fn kiosk_id_from_url(url: &Url) -> Result<i64, UrlParamError> {
    let raw = query_param(url, "kioskId").ok_or(UrlParamError::MissingKioskId)?;

    match leading_integer(&raw) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(UrlParamError::InvalidKioskId(raw)),
    }
}

/// Reads the kiosk secret from the `secret` query parameter.
pub fn kiosk_secret_from_url(url: &Url) -> Option<String> {
    query_param(url, "secret")
}

/// Value of a query parameter, if present and non-empty.
fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn kiosk_url(query: &str) -> Url {
        Url::parse(&format!("https://kiosk.example.cz/{query}")).unwrap()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.5), "1\u{a0}234,50\u{a0}Kč");
        assert_eq!(format_price(0.1 + 0.2), "0,30\u{a0}Kč");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap();
        assert_eq!(format_date(&date), "19. říj 2026 14:05");

        let prague = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_date(&date.with_timezone(&prague)), "19. říj 2026 16:05");

        let january = Utc.with_ymd_and_hms(2025, 1, 3, 8, 0, 0).unwrap();
        assert_eq!(format_date(&january), "3. led 2025 08:00");
    }

    #[test]
    fn test_generate_payment_id_shape() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let id = generate_payment_id_at(now);
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "pay");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_random_base36_length() {
        assert_eq!(random_base36(0), "");
        assert_eq!(random_base36(12).len(), 12);
        assert_eq!(random_base36(100).len(), 24);
    }

    #[test]
    fn test_generate_payment_id_is_random() {
        assert_ne!(generate_payment_id(), generate_payment_id());
    }

    #[test]
    fn test_kiosk_id_from_url() {
        assert_eq!(kiosk_id_from_url(&kiosk_url("?kioskId=3")), Ok(3));
        assert_eq!(kiosk_id_from_url(&kiosk_url("?kioskId=12abc")), Ok(12));
        assert_eq!(
            kiosk_id_from_url(&kiosk_url("?secret=x")),
            Err(UrlParamError::MissingKioskId)
        );
        assert_eq!(
            kiosk_id_from_url(&kiosk_url("?kioskId=")),
            Err(UrlParamError::MissingKioskId)
        );
        assert_eq!(
            kiosk_id_from_url(&kiosk_url("?kioskId=0")),
            Err(UrlParamError::InvalidKioskId("0".to_string()))
        );
        let err = kiosk_id_from_url(&kiosk_url("?kioskId=abc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid kiosk ID: abc. Kiosk ID must be a positive number."
        );
    }

    #[test]
    fn test_kiosk_secret_from_url() {
        assert_eq!(
            kiosk_secret_from_url(&kiosk_url("?kioskId=1&secret=s3cr3t")),
            Some("s3cr3t".to_string())
        );
        assert_eq!(kiosk_secret_from_url(&kiosk_url("?kioskId=1&secret=")), None);
        assert_eq!(kiosk_secret_from_url(&kiosk_url("?kioskId=1")), None);
    }
}
