pub mod authentication_state_provider;
pub mod email_sender;
pub mod error;
pub mod identity_service;
pub mod password_hasher;
pub mod token_generator;

pub use authentication_state_provider::{AuthenticationState, AuthenticationStateProvider};
pub use email_sender::{EmailSender, NoOpEmailSender};
pub use error::{AuthError, Result};
pub use identity_service::{IdentityService, Registration, SignIn};
pub use password_hasher::{Argon2Hasher, PasswordHasher};
pub use token_generator::{generate_token, tokens_match};
