/// Number of random bytes behind each token; hex-encoded to twice as many chars.
const TOKEN_BYTES: usize = 20;

/// Mint a new opaque bearer token.
pub fn generate() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Cheap shape check so malformed tokens never reach the database.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}
