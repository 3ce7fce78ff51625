//! # Validation Module
//!
//! Form validation shared by the kiosk and admin front-ends and the backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Single validators                                             │
//! │  ├── required, email, min_length, max_length, price, ...                │
//! │  └── Ok(()) or FieldError (Display = Czech message)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rule                                                          │
//! │  └── A validator applied to a raw JSON form value                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ValidationSchema                                              │
//! │  ├── field ──► [Rule, Rule, ...] (first failure wins)                   │
//! │  └── ValidationReport { is_valid, errors: field ──► message }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty values pass every validator except [`required`]; whether a field
//! may be empty is decided by putting [`Rule::Required`] in front of it.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{schemas, validate_schema};
//! use serde_json::json;
//!
//! let form = json!({ "username": "admin", "password": "123" });
//! let report = validate_schema(form.as_object().unwrap(), &schemas::login());
//!
//! assert!(!report.is_valid);
//! assert_eq!(report.errors["password"], "Heslo musí mít alespoň 6 znaků");
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::FieldError;
use crate::money::{MAX_PRICE, MIN_PRICE};
use crate::{MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, FieldError>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username regex"));

/// Default field label of [`quantity`].
pub const QUANTITY_FIELD: &str = "Množství";
/// Default field label of [`price`].
pub const PRICE_FIELD: &str = "Cena";

// =============================================================================
// String Validators
// =============================================================================

/// Fails on null and on the empty string.
pub fn required(value: &Value) -> ValidationResult<()> {
    match value {
        Value::Null => Err(FieldError::Required),
        Value::String(s) if s.is_empty() => Err(FieldError::Required),
        _ => Ok(()),
    }
}

/// Checks the `local@domain.tld` shape and rejects consecutive dots.
pub fn email(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if validate_email(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// At least `min` characters.
pub fn min_length(value: &str, min: usize, field: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if value.chars().count() < min {
        return Err(FieldError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    Ok(())
}

/// At most `max` characters.
pub fn max_length(value: &str, max: usize, field: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if value.chars().count() > max {
        return Err(FieldError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Admin login name.
///
/// ## Rules
/// - At least 3 characters (checked first)
/// - Only ASCII letters, digits and underscores
pub fn username(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if value.chars().count() < MIN_USERNAME_LENGTH {
        return Err(FieldError::UsernameTooShort {
            min: MIN_USERNAME_LENGTH,
        });
    }

    if !USERNAME_RE.is_match(value) {
        return Err(FieldError::UsernameCharacters);
    }

    Ok(())
}

pub fn password(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

pub fn positive_number(value: f64, field: &str) -> ValidationResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(FieldError::NotPositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Kiosk ids are positive integers.
pub fn kiosk_id(value: f64) -> ValidationResult<()> {
    if !is_integer(value) || value <= 0.0 {
        return Err(FieldError::InvalidKioskId);
    }
    Ok(())
}

/// Stock quantities are non-negative integers.
pub fn quantity(value: f64, field: &str) -> ValidationResult<()> {
    if !is_integer(value) || value < 0.0 {
        return Err(FieldError::InvalidQuantity {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Product or payment price in CZK.
///
/// ## Rules (in order)
/// 1. A number greater than zero
/// 2. Within `0.01 ..= 999 999.99`
/// 3. At most two decimal places (tolerance 0.001)
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::price;
///
/// assert!(price(12.5, "Cena").is_ok());
/// assert!(price(0.0, "Cena").is_err());
/// assert!(price(1_000_000.0, "Cena").is_err());
/// assert!(price(1.234, "Cena").is_err());
/// ```
pub fn price(value: f64, field: &str) -> ValidationResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(FieldError::PriceNotPositive {
            field: field.to_string(),
        });
    }

    if !(MIN_PRICE..=MAX_PRICE).contains(&value) {
        return Err(FieldError::PriceOutOfRange {
            field: field.to_string(),
        });
    }

    let rounded = (value * 100.0).round() / 100.0;
    if (value - rounded).abs() > 0.001 {
        return Err(FieldError::PriceTooPrecise {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Boolean Utilities
// =============================================================================

/// Boolean form of [`email`]; the empty string is not an email here.
pub fn validate_email(value: &str) -> bool {
    !value.contains("..") && EMAIL_RE.is_match(value)
}

pub fn validate_kiosk_id(value: i64) -> bool {
    value > 0
}

/// Czech variable symbol: 1 to 10 digits.
pub fn validate_variable_symbol(value: &str) -> ValidationResult<()> {
    let len = value.len();
    if (1..=10).contains(&len) && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::InvalidVariableSymbol)
    }
}

fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

// =============================================================================
// Rules
// =============================================================================

/// A validator bound to its parameters, applied to a raw form value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Email,
    MinLength { min: usize, field: String },
    MaxLength { max: usize, field: String },
    PositiveNumber { field: String },
    Username,
    Password,
    KioskId,
    Quantity { field: String },
    Price { field: String },
}

impl Rule {
    pub fn min_length(min: usize, field: &str) -> Self {
        Rule::MinLength {
            min,
            field: field.to_string(),
        }
    }

    pub fn max_length(max: usize, field: &str) -> Self {
        Rule::MaxLength {
            max,
            field: field.to_string(),
        }
    }

    pub fn positive_number(field: &str) -> Self {
        Rule::PositiveNumber {
            field: field.to_string(),
        }
    }

    pub fn quantity(field: &str) -> Self {
        Rule::Quantity {
            field: field.to_string(),
        }
    }

    pub fn price(field: &str) -> Self {
        Rule::Price {
            field: field.to_string(),
        }
    }

    /// Applies the rule to a form value.
    ///
    /// Text rules expect strings, numeric rules accept numbers and numeric
    /// strings. Null and the empty string pass everything but `Required`.
    pub fn check(&self, value: &Value) -> ValidationResult<()> {
        if let Rule::Required = self {
            return required(value);
        }
        if is_empty(value) {
            return Ok(());
        }

        match self {
            Rule::Required => Ok(()),
            Rule::Email => email(text(value, "Email")?),
            Rule::MinLength { min, field } => min_length(text(value, field)?, *min, field),
            Rule::MaxLength { max, field } => max_length(text(value, field)?, *max, field),
            Rule::Username => username(text(value, "Uživatelské jméno")?),
            Rule::Password => password(text(value, "Heslo")?),
            Rule::PositiveNumber { field } => match number(value) {
                Some(n) => positive_number(n, field),
                None => Err(FieldError::NotPositive {
                    field: field.clone(),
                }),
            },
            Rule::KioskId => kiosk_id(number(value).unwrap_or(f64::NAN)),
            Rule::Quantity { field } => quantity(number(value).unwrap_or(f64::NAN), field),
            Rule::Price { field } => price(number(value).unwrap_or(f64::NAN), field),
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn text<'a>(value: &'a Value, field: &str) -> ValidationResult<&'a str> {
    value.as_str().ok_or_else(|| FieldError::InvalidFormat {
        field: field.to_string(),
    })
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Schemas
// =============================================================================

/// Ordered list of fields and the rules each must pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSchema {
    fields: Vec<(String, Vec<Rule>)>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with its rules, evaluated in the given order.
    pub fn field(mut self, name: &str, rules: Vec<Rule>) -> Self {
        self.fields.push((name.to_string(), rules));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields.iter().map(|(n, r)| (n.as_str(), r.as_slice()))
    }
}

/// Outcome of [`validate_schema`]: the first error message per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Validates form data against a schema.
///
/// Missing fields are validated as null. Evaluation of a field stops at its
/// first failing rule.
pub fn validate_schema(data: &Map<String, Value>, schema: &ValidationSchema) -> ValidationReport {
    let mut errors = BTreeMap::new();

    for (field, rules) in schema.fields() {
        let value = data.get(field).unwrap_or(&Value::Null);
        if let Some(err) = rules.iter().find_map(|rule| rule.check(value).err()) {
            errors.insert(field.to_string(), err.to_string());
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Built-in schemas for the forms of the kiosk and admin apps.
pub mod schemas {
    use super::{Rule, ValidationSchema, PRICE_FIELD, QUANTITY_FIELD};
    use crate::{MAX_DESCRIPTION_LENGTH, MAX_PRODUCT_NAME_LENGTH, MIN_PRODUCT_NAME_LENGTH};

    const PRODUCT_NAME_FIELD: &str = "Název produktu";
    const DESCRIPTION_FIELD: &str = "Popis";
    const PRODUCT_ID_FIELD: &str = "ID produktu";

    /// Admin login: `username`, `password`.
    pub fn login() -> ValidationSchema {
        ValidationSchema::new()
            .field("username", vec![Rule::Required, Rule::Username])
            .field("password", vec![Rule::Required, Rule::Password])
    }

    /// Receipt email entered on the kiosk: `email`.
    pub fn customer_email() -> ValidationSchema {
        ValidationSchema::new().field("email", vec![Rule::Required, Rule::Email])
    }

    /// Admin product form: `name`, `price`, `description`.
    pub fn product() -> ValidationSchema {
        ValidationSchema::new()
            .field(
                "name",
                vec![
                    Rule::Required,
                    Rule::min_length(MIN_PRODUCT_NAME_LENGTH, PRODUCT_NAME_FIELD),
                    Rule::max_length(MAX_PRODUCT_NAME_LENGTH, PRODUCT_NAME_FIELD),
                ],
            )
            .field("price", vec![Rule::Required, Rule::price(PRICE_FIELD)])
            .field(
                "description",
                vec![Rule::max_length(MAX_DESCRIPTION_LENGTH, DESCRIPTION_FIELD)],
            )
    }

    pub fn kiosk_id() -> ValidationSchema {
        ValidationSchema::new().field("kioskId", vec![Rule::Required, Rule::KioskId])
    }

    /// Inventory update: `quantityInStock`.
    pub fn inventory() -> ValidationSchema {
        ValidationSchema::new().field(
            "quantityInStock",
            vec![Rule::Required, Rule::quantity(QUANTITY_FIELD)],
        )
    }

    /// Single-product payment: `productId`, `kioskId`, `amount`.
    pub fn payment() -> ValidationSchema {
        ValidationSchema::new()
            .field(
                "productId",
                vec![Rule::Required, Rule::positive_number(PRODUCT_ID_FIELD)],
            )
            .field("kioskId", vec![Rule::Required, Rule::KioskId])
            .field("amount", vec![Rule::Required, Rule::price(PRICE_FIELD)])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required() {
        assert_eq!(required(&Value::Null), Err(FieldError::Required));
        assert_eq!(required(&json!("")), Err(FieldError::Required));
        assert!(required(&json!(" ")).is_ok());
        assert!(required(&json!(0)).is_ok());
        assert!(required(&json!(false)).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(email("jan.novak@example.cz").is_ok());
        assert!(email("").is_ok());
        assert_eq!(email("jan@example"), Err(FieldError::InvalidEmail));
        assert_eq!(email("jan novak@example.cz"), Err(FieldError::InvalidEmail));
        assert_eq!(email("jan..novak@example.cz"), Err(FieldError::InvalidEmail));
        assert_eq!(email("jan@example..cz"), Err(FieldError::InvalidEmail));
    }

    #[test]
    fn test_validate_email_utility() {
        assert!(validate_email("a@b.cz"));
        assert!(!validate_email(""));
        assert!(!validate_email("a..b@c.cz"));
    }

    #[test]
    fn test_lengths_count_characters() {
        assert!(min_length("Čaj", 3, "Název").is_ok());
        assert!(max_length("Čaj", 3, "Název").is_ok());
        assert_eq!(
            min_length("A", 2, "Název produktu").unwrap_err().to_string(),
            "Název produktu musí mít alespoň 2 znaků"
        );
        assert_eq!(
            max_length("ABCD", 3, "Popis").unwrap_err().to_string(),
            "Popis může mít maximálně 3 znaků"
        );
        assert!(min_length("", 2, "Název").is_ok());
    }

    #[test]
    fn test_username_checks_length_first() {
        assert!(username("admin_1").is_ok());
        assert_eq!(
            username("a!").unwrap_err().to_string(),
            "Uživatelské jméno musí mít alespoň 3 znaky"
        );
        assert_eq!(username("ad min"), Err(FieldError::UsernameCharacters));
    }

    #[test]
    fn test_password() {
        assert!(password("secret").is_ok());
        assert_eq!(
            password("12345").unwrap_err().to_string(),
            "Heslo musí mít alespoň 6 znaků"
        );
    }

    #[test]
    fn test_kiosk_id_and_quantity() {
        assert!(kiosk_id(1.0).is_ok());
        assert_eq!(kiosk_id(0.0), Err(FieldError::InvalidKioskId));
        assert_eq!(kiosk_id(1.5), Err(FieldError::InvalidKioskId));

        assert!(quantity(0.0, QUANTITY_FIELD).is_ok());
        assert_eq!(
            quantity(-1.0, QUANTITY_FIELD).unwrap_err().to_string(),
            "Množství musí být nezáporné celé číslo"
        );
        assert!(quantity(2.5, QUANTITY_FIELD).is_err());
    }

    #[test]
    fn test_price_range_and_precision() {
        assert!(price(0.01, PRICE_FIELD).is_ok());
        assert!(price(999_999.99, PRICE_FIELD).is_ok());
        assert!(price(19.9, PRICE_FIELD).is_ok());

        assert_eq!(
            price(0.0, PRICE_FIELD).unwrap_err().to_string(),
            "Cena musí být kladné číslo"
        );
        assert!(matches!(
            price(f64::NAN, PRICE_FIELD),
            Err(FieldError::PriceNotPositive { .. })
        ));
        assert!(matches!(
            price(0.005, PRICE_FIELD),
            Err(FieldError::PriceOutOfRange { .. })
        ));
        assert!(matches!(
            price(1_000_000.0, PRICE_FIELD),
            Err(FieldError::PriceOutOfRange { .. })
        ));
        assert_eq!(
            price(10.123, PRICE_FIELD).unwrap_err().to_string(),
            "Cena může mít maximálně 2 desetinná místa"
        );
    }

    #[test]
    fn test_variable_symbol() {
        assert!(validate_variable_symbol("1").is_ok());
        assert!(validate_variable_symbol("1234567890").is_ok());
        assert!(validate_variable_symbol("").is_err());
        assert!(validate_variable_symbol("12345678901").is_err());
        assert!(validate_variable_symbol("12a").is_err());
    }

    #[test]
    fn test_rules_skip_empty_values() {
        for rule in [Rule::Email, Rule::Username, Rule::KioskId, Rule::price(PRICE_FIELD)] {
            assert!(rule.check(&Value::Null).is_ok());
            assert!(rule.check(&json!("")).is_ok());
        }
        assert!(Rule::Required.check(&Value::Null).is_err());
    }

    #[test]
    fn test_rules_accept_numeric_strings() {
        assert!(Rule::KioskId.check(&json!("3")).is_ok());
        assert!(Rule::price(PRICE_FIELD).check(&json!("49.90")).is_ok());
        assert!(Rule::price(PRICE_FIELD).check(&json!("abc")).is_err());
        assert_eq!(
            Rule::Email.check(&json!(42)),
            Err(FieldError::InvalidFormat {
                field: "Email".to_string()
            })
        );
    }

    #[test]
    fn test_login_schema() {
        let report = validate_schema(
            &form(json!({ "username": "ad", "password": "secret1" })),
            &schemas::login(),
        );
        assert!(!report.is_valid);
        assert_eq!(
            report.error("username"),
            Some("Uživatelské jméno musí mít alespoň 3 znaky")
        );
        assert_eq!(report.error("password"), None);
    }

    #[test]
    fn test_schema_stops_at_first_error_per_field() {
        let report = validate_schema(&form(json!({})), &schemas::login());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.error("username"), Some("Toto pole je povinné"));
        assert_eq!(report.error("password"), Some("Toto pole je povinné"));
    }

    #[test]
    fn test_product_schema() {
        let valid = validate_schema(
            &form(json!({ "name": "Káva", "price": 45.5, "description": "" })),
            &schemas::product(),
        );
        assert!(valid.is_valid);
        assert!(valid.errors.is_empty());

        let invalid = validate_schema(
            &form(json!({
                "name": "K",
                "price": 45.555,
                "description": "x".repeat(501),
            })),
            &schemas::product(),
        );
        assert_eq!(
            invalid.error("name"),
            Some("Název produktu musí mít alespoň 2 znaků")
        );
        assert_eq!(
            invalid.error("price"),
            Some("Cena může mít maximálně 2 desetinná místa")
        );
        assert_eq!(
            invalid.error("description"),
            Some("Popis může mít maximálně 500 znaků")
        );
    }

    #[test]
    fn test_payment_and_inventory_schemas() {
        let report = validate_schema(
            &form(json!({ "productId": 0, "kioskId": 2, "amount": 10 })),
            &schemas::payment(),
        );
        assert_eq!(report.error("productId"), Some("ID produktu musí být větší než 0"));
        assert_eq!(report.errors.len(), 1);

        let report = validate_schema(
            &form(json!({ "quantityInStock": 0 })),
            &schemas::inventory(),
        );
        assert!(report.is_valid);
    }

    #[test]
    fn test_customer_email_and_kiosk_id_schemas() {
        let report = validate_schema(
            &form(json!({ "email": "bad..mail@x.cz" })),
            &schemas::customer_email(),
        );
        assert_eq!(report.error("email"), Some("Zadejte platnou emailovou adresu"));

        let report = validate_schema(&form(json!({ "kioskId": -4 })), &schemas::kiosk_id());
        assert_eq!(report.error("kioskId"), Some("Kiosk ID musí být kladné celé číslo"));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = validate_schema(&form(json!({})), &schemas::kiosk_id());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"]["kioskId"], "Toto pole je povinné");
    }
}
