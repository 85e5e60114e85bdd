//! Client core for do-not-play list management
//!
//! Password strength evaluation, debounced search, form validation and the
//! store actions (DNP list, community lists, enforcement, analytics, auth)
//! that talk to the remote API.
//!
//! # Features
//!
//! - `async` (default): Debounced search and delayed evaluation on tokio
//! - `http`: `reqwest`-backed [`HttpApiClient`]
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `DNP_API_URL`: API base URL (default: `http://localhost:3000`)
//! - `DNP_SEARCH_DEBOUNCE_MS`: search debounce delay (default: `300`)
//! - `DNP_REQUEST_TIMEOUT_SECS`: HTTP timeout (default: `30`)
//! - `DNP_COMMON_PASSWORDS_PATH`: common password list, installed by
//!   [`ClientConfig::load_common_passwords`]
//!   (default: `./assets/common-passwords.txt`)
//!
//! # Example
//!
//! ```rust
//! use dnp_client::{evaluate_password_strength, RegisterForm, StrengthLabel};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("Aa1!aaaa".to_string().into());
//! let evaluation = evaluate_password_strength(&password);
//! assert_eq!(evaluation.score.value(), 5);
//! assert_eq!(evaluation.label(), StrengthLabel::Strong);
//!
//! let form = RegisterForm::new("fan@example.com", "Aa1!aaaa", "Aa1!aaab");
//! assert!(!form.form_valid());
//! ```

// Internal modules
mod common_passwords;
mod evaluator;
mod sections;
mod types;

pub mod actions;
pub mod api;
pub mod config;
pub mod forms;
pub mod models;

#[cfg(feature = "async")]
pub mod debounce;
#[cfg(feature = "async")]
mod search;

#[cfg(feature = "http")]
mod http;

// Public API
pub use common_passwords::{
    common_passwords_loaded, install_common_passwords, installed_common_passwords,
    is_common_password, CommonPasswords, CommonPasswordsError,
};
pub use evaluator::evaluate_password_strength;
pub use sections::{MIN_LENGTH, SPECIAL_CHARS};
pub use types::{
    Criteria, Criterion, PasswordEvaluation, PasswordScore, StrengthLabel, MAX_SCORE,
    SUBMIT_MIN_SCORE,
};

pub use actions::{AnalyticsActions, AuthActions, CommunityActions, DnpActions, EnforcementActions};
pub use api::{path_segment, ActionResult, ApiClient, ApiError, ApiRequest};
pub use config::{ClientConfig, ConfigError};
pub use forms::{validate_email, AddArtistForm, Field, FormErrors, LoginForm, RegisterForm, ValidationError};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_strength_tx;
#[cfg(feature = "async")]
pub use debounce::{Debouncer, SearchSignal, SearchTrigger};
#[cfg(feature = "async")]
pub use search::ArtistSearch;

#[cfg(feature = "http")]
pub use http::HttpApiClient;
