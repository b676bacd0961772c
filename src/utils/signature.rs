use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 hex digest over the raw payload bytes. Receivers recompute
/// this from the request body and compare against the signature header.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_stable_and_key_dependent() {
        let body = br#"{"event":"fit_score.recomputed"}"#;
        let first = sign_payload("secret-a", body);
        let second = sign_payload("secret-a", body);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, sign_payload("secret-b", body));
    }
}
