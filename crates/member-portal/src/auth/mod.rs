//! Login, registration and password flows, validated before anything reaches the backend.

pub mod gateway;
pub mod router;
pub mod service;
pub mod session;
pub mod validation;


pub use gateway::AuthGateway;
pub use router::auth_router;
pub use service::{AuthError, AuthService};
pub use session::{AuthSession, InMemorySessionStore, SessionStore, SessionUser};
pub use validation::{
    is_thai_text, is_valid_phone, validate_email_field, LoginForm, PasswordCriteria,
    PasswordStrength, RegistrationForm, ResetPasswordForm, LOGIN_REQUIRED_MESSAGE,
};
