use crate::password;

#[test]
fn given_any_password_when_hashed_then_it_verifies() {
    for pw in ["Secret123", "", "p", "пароль", "a much longer passphrase with spaces"] {
        let material = password::hash(pw);
        assert!(password::verify(pw, &material.hash, &material.salt));
    }
}

#[test]
fn given_wrong_password_when_verified_then_rejected() {
    let material = password::hash("Secret123");
    assert!(!password::verify("Secret124", &material.hash, &material.salt));
    assert!(!password::verify("secret123", &material.hash, &material.salt));
    assert!(!password::verify("", &material.hash, &material.salt));
}

#[test]
fn given_same_password_when_hashed_twice_then_material_differs() {
    // Fresh salt every time
    let first = password::hash("Secret123");
    let second = password::hash("Secret123");

    assert_ne!(first.salt, second.salt);
    assert_ne!(first.hash, second.hash);
}

#[test]
fn given_foreign_salt_when_verified_then_rejected() {
    let material = password::hash("Secret123");
    let other = password::hash("Secret123");

    // Hash from one derivation never verifies under another salt
    assert!(!password::verify("Secret123", &material.hash, &other.salt));
}

#[test]
fn given_malformed_stored_material_when_verified_then_fails_closed() {
    let material = password::hash("Secret123");

    // Not base64
    assert!(!password::verify("Secret123", &material.hash, "!!not-base64!!"));
    assert!(!password::verify("Secret123", "!!not-base64!!", &material.salt));
    // Truncated digest
    assert!(!password::verify("Secret123", "c2hvcnQ=", &material.salt));
    // Empty
    assert!(!password::verify("Secret123", "", ""));
}

#[test]
fn given_derived_material_then_lengths_match_hmac_sha512() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let material = password::hash("Secret123");
    assert_eq!(BASE64.decode(&material.salt).unwrap().len(), 64);
    assert_eq!(BASE64.decode(&material.hash).unwrap().len(), 64);
}
