//! Webhook signature verification.
//!
//! The platform signs every delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64 digest in the
//! `x-line-signature` header.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

fn mac(secret: &str, body: &[u8]) -> HmacSha256 {
  // HMAC accepts keys of any length.
  let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
    .unwrap_or_else(|_| unreachable!("hmac key length is unrestricted"));
  mac.update(body);
  mac
}

/// Compute the signature the platform would send for `body`.
pub fn sign(secret: &str, body: &[u8]) -> String {
  B64.encode(mac(secret, body).finalize().into_bytes())
}

/// Check `signature` against `body` in constant time.
pub fn verify(secret: &str, body: &[u8], signature: &str) -> bool {
  let Ok(expected) = B64.decode(signature.trim()) else {
    return false;
  };
  mac(secret, body).verify_slice(&expected).is_ok()
}
