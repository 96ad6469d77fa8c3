use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Bitkub v3 string-to-sign: `timestamp + method + path + body`, no separators.
pub fn signature_payload(timestamp: &str, method: &str, path: &str, body: &str) -> String {
    let mut payload = String::with_capacity(timestamp.len() + method.len() + path.len() + body.len());
    payload.push_str(timestamp);
    payload.push_str(method);
    payload.push_str(path);
    payload.push_str(body);
    payload
}

/// HMAC-SHA256 of `payload` keyed by the UTF-8 bytes of `secret`.
/// Returns lowercase hex.
pub fn sign(secret: &str, payload: &str) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign a request in one step.
pub fn sign_request(
    secret: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    body: &str,
) -> Result<String, InvalidLength> {
    sign(secret, &signature_payload(timestamp, method, path, body))
}
