use crate::utils::validation::normalize_email;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";
pub const DEFAULT_AVATAR_SIZE: u32 = 200;

/// Gravatar URL for an email, keyed on the md5 of its normalized form.
pub fn derive_avatar_url(email: &str) -> String {
    avatar_url_with_size(email, DEFAULT_AVATAR_SIZE)
}

pub fn avatar_url_with_size(email: &str, size: u32) -> String {
    let digest = md5::compute(normalize_email(email).as_bytes());
    format!("{}/{:x}?s={}&d=identicon", GRAVATAR_BASE, digest, size)
}
