//! Signed, expiring, purpose-scoped tokens for emailed links.

mod claims;
mod codec;
mod errors;
mod issuer;
mod purpose;
mod secret;
mod verifier;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use issuer::{IssuedToken, TokenIssuer, TokenTtls};
pub use purpose::{TokenPurpose, UnknownTokenPurpose};
pub use secret::{MIN_SIGNING_SECRET_BYTES, SigningSecret, SigningSecretError};
pub use verifier::{
    MockTokenVerifier, RevocableVerifier, StatelessVerifier, TokenVerifier, TokenVerifiers,
    VerifiedToken,
};
