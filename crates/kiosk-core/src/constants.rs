//! Application-wide constants and UI strings.
//!
//! Durations are in milliseconds, matching the values the front-ends and the
//! backend exchange in configuration.

// =============================================================================
// Network
// =============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:3015";
pub const DEFAULT_WS_URL: &str = "ws://localhost:3015";

pub const API_TIMEOUT_MS: u64 = 10_000;
pub const RETRY_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 1_000;

pub const WS_RECONNECT_ATTEMPTS: u32 = 5;
pub const WS_RECONNECT_INTERVAL_MS: u64 = 3_000;
pub const WS_HEARTBEAT_INTERVAL_MS: u64 = 30_000;

// =============================================================================
// UI Timing
// =============================================================================

pub const LOADING_DEBOUNCE_MS: u64 = 300;
/// How long an error notice stays visible before auto-hiding.
pub const ERROR_DISPLAY_DURATION_MS: u64 = 5_000;

// =============================================================================
// Validation Limits
// =============================================================================

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PRODUCT_NAME_LENGTH: usize = 100;
pub const MIN_PRODUCT_NAME_LENGTH: usize = 2;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

// =============================================================================
// Kiosk & Payments
// =============================================================================

pub const DEFAULT_KIOSK_ID: i64 = 1;
pub const PAYMENT_POLLING_INTERVAL_MS: u64 = 3_000;
pub const PRODUCT_CACHE_TTL_MS: u64 = 300_000;

/// Placeholder receiving account used by mock payments.
pub const PAYMENT_ACCOUNT_NUMBER: &str = "1234567890";
pub const CURRENCY: &str = "CZK";
pub const QR_CODE_WIDTH: u32 = 300;
/// Header of a Short Payment Descriptor payload.
pub const QR_CODE_FORMAT: &str = "SPD*1.0";

// =============================================================================
// UI Messages
// =============================================================================

/// Czech strings shown by the kiosk and admin front-ends.
pub mod ui_messages {
    // Loading states
    pub const LOADING_PRODUCTS: &str = "Načítání produktů...";
    pub const LOADING_PAYMENT: &str = "Zpracovávám platbu...";
    pub const GENERATING_QR: &str = "Generuji QR kód...";
    pub const PAYMENT_INITIALIZING: &str = "Inicializuji platbu...";

    // Success messages
    pub const PAYMENT_SUCCESS: &str = "Platba byla úspěšně zpracována!";
    pub const PRODUCT_SAVED: &str = "Produkt byl úspěšně uložen!";

    // Error messages
    pub const NETWORK_ERROR: &str = "Problém s připojením. Zkuste to znovu.";
    pub const VALIDATION_ERROR: &str = "Zkontrolujte zadané údaje.";
    pub const UNKNOWN_ERROR: &str = "Něco se pokazilo. Zkuste to znovu.";
    pub const PAYMENT_ERROR: &str = "Chyba při zpracování platby";

    // Empty states
    pub const NO_PRODUCTS: &str = "Žádné produkty nejsou k dispozici";
    pub const NO_TRANSACTIONS: &str = "Žádné transakce";
    pub const COMING_SOON: &str = "Připravujeme pro vás...";

    // Form validation
    pub const REQUIRED_FIELD: &str = "Toto pole je povinné";
    pub const INVALID_EMAIL: &str = "Zadejte platnou emailovou adresu";
    pub const INVALID_PRICE: &str = "Cena musí být větší než 0";
    pub const EMAIL_LABEL: &str = "Váš email:";

    // Kiosk specific
    pub const SELECT_PRODUCT: &str = "Vyberte si produkt";
    pub const PAYMENT_WAITING: &str = "Čekám na platbu...";
    pub const PAYMENT_CONFIRMED: &str = "Platba potvrzena!";
    pub const CONTINUE_SHOPPING: &str = "Pokračovat v nákupu";
    pub const BACK_TO_PRODUCTS: &str = "Zpět na produkty";

    // Action buttons
    pub const RETRY: &str = "Zkusit znovu";
    pub const CANCEL: &str = "Zrušit";

    // Error class defaults, used by the error mapper
    pub const AUTH_ERROR: &str = "Neplatné přihlašovací údaje.";
    pub const INVALID_CREDENTIALS: &str = "Neplatné přihlašovací údaje";
    pub const UNEXPECTED_ERROR: &str = "Došlo k neočekávané chybě";
    pub const CONNECTION_FAILED: &str = "Chyba připojení k serveru";
    pub const COMMUNICATION_FAILED: &str = "Chyba při komunikaci se serverem";
    pub const DEFAULT_RESOURCE: &str = "Zdroj";
}
