//! # Short Payment Descriptor
//!
//! Czech QR payment payload (`SPD*1.0*...`) encoded into the QR code that
//! customers scan with their banking app.
//!
//! ```text
//! SPD*1.0*ACC:1234567890*AM:136.50*CC:CZK*X-VS:2024000123*MSG:KIOSK 3
//! ─┬───── ─┬──────────── ─┬─────── ─┬──── ─┬────────────── ─┬───────
//!  │       │              │         │      │                └ message (≤ 60 chars)
//!  │       │              │         │      └ variable symbol (1-10 digits)
//!  │       │              │         └ currency
//!  │       │              └ amount, two decimals
//!  │       └ receiving account
//!  └ header + version
//! ```
//!
//! `*` separates the attributes, so it is stripped from free text.

use std::fmt;

use crate::error::FieldError;
use crate::money::Money;
use crate::validation::validate_variable_symbol;
use crate::{CURRENCY, QR_CODE_FORMAT};

/// Longest message banking apps are required to accept.
pub const MAX_MESSAGE_CHARS: usize = 60;

const AMOUNT_FIELD: &str = "Částka";

/// A QR bank transfer request. `Display` renders the SPD string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdPayment {
    account: String,
    amount: Money,
    currency: String,
    variable_symbol: Option<String>,
    message: Option<String>,
}

impl SpdPayment {
    /// Transfer of `amount` CZK to `account`. The amount must be positive.
    pub fn new(account: &str, amount: Money) -> Result<Self, FieldError> {
        if !amount.is_positive() {
            return Err(FieldError::PriceNotPositive {
                field: AMOUNT_FIELD.to_string(),
            });
        }
        Ok(SpdPayment {
            account: sanitize(account).to_uppercase(),
            amount,
            currency: CURRENCY.to_string(),
            variable_symbol: None,
            message: None,
        })
    }

    /// Attaches the variable symbol the backend matches bank movements by.
    pub fn with_variable_symbol(mut self, variable_symbol: &str) -> Result<Self, FieldError> {
        validate_variable_symbol(variable_symbol)?;
        self.variable_symbol = Some(variable_symbol.to_string());
        Ok(self)
    }

    /// Attaches a message for the recipient, uppercased and cut to 60 chars.
    pub fn with_message(mut self, message: &str) -> Self {
        let message: String = sanitize(message)
            .to_uppercase()
            .chars()
            .take(MAX_MESSAGE_CHARS)
            .collect();
        self.message = (!message.is_empty()).then_some(message);
        self
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn variable_symbol(&self) -> Option<&str> {
        self.variable_symbol.as_deref()
    }
}

impl fmt::Display for SpdPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}*ACC:{}*AM:{}.{:02}*CC:{}",
            QR_CODE_FORMAT,
            self.account,
            self.amount.koruny(),
            self.amount.halere_part(),
            self.currency
        )?;
        if let Some(vs) = &self.variable_symbol {
            write!(f, "*X-VS:{vs}")?;
        }
        if let Some(msg) = &self.message {
            write!(f, "*MSG:{msg}")?;
        }
        Ok(())
    }
}

fn sanitize(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
