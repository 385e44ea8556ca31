/// Courier API credential
///
/// A single static bearer token: 32 random bytes, hex encoded, stored in a
/// plaintext file. Generated once out of band, read once at server start.
/// No rotation, expiry or multi-token support.

pub mod token;

pub use token::{ApiToken, TokenError, generate, load};
