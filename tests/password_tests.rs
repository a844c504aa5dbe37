use harbonline_backend::util::password::*;

fn get_test_passwords() -> Vec<(&'static str, bool)> {
    vec![
        ("ValidPass123!", true),
        ("weak", false),
        ("nouppercase123!", false),
        ("NOLOWERCASE123!", false),
        ("NoDigitsHere!", false),
        ("NoSpecialChars123", false),
        ("Short1!", false),
        ("AnotherValidOne456@", true),
        ("ComplexP@ssw0rd2026", true),
        ("", false),
        ("Aa1!", false),
    ]
}

#[test]
fn test_hash_password_success() {
    let password = "Harbour#Lights42";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$argon2id$"));
}

#[test]
fn test_hashes_are_salted() {
    let first = PasswordUtilsImpl::hash_password("SamePassword1!").unwrap();
    let second = PasswordUtilsImpl::hash_password("SamePassword1!").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_verify_password() {
    let hash = PasswordUtilsImpl::hash_password("Harbour#Lights42").unwrap();
    assert!(PasswordUtilsImpl::verify_password("Harbour#Lights42", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("harbour#lights42", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_with_malformed_hash() {
    assert!(matches!(
        PasswordUtilsImpl::verify_password("anything", "not-a-hash"),
        Err(PasswordError::InvalidHashFormat)
    ));
}

#[test]
fn test_password_strength_table() {
    for (password, expected) in get_test_passwords() {
        assert_eq!(
            PasswordUtilsImpl::validate_password_strength(password).is_ok(),
            expected,
            "unexpected strength result for {:?}",
            password
        );
    }
}

#[test]
fn test_password_strength_lists_every_failure() {
    let errors = PasswordUtilsImpl::validate_password_strength("abc").unwrap_err();
    assert_eq!(errors.len(), 4);
    assert!(errors.contains(&"Password must be at least 8 characters long".to_string()));
    assert!(errors.contains(&"Password must contain at least one digit".to_string()));
}
