use super::*;

fn valid() -> Result<RegisterRequest, &'static str> {
    validate_register_input(" Budi ", "budi@ajarin.id", "rahasia", "rahasia", "student")
}

#[test]
fn validate_register_input_builds_trimmed_request() {
    let request = valid().unwrap();
    assert_eq!(request.name, "Budi");
    assert_eq!(request.email, "budi@ajarin.id");
    assert_eq!(request.role.as_deref(), Some("student"));
}

#[test]
fn validate_register_input_requires_fields() {
    assert!(validate_register_input("", "budi@ajarin.id", "rahasia", "rahasia", "student").is_err());
    assert!(validate_register_input("Budi", " ", "rahasia", "rahasia", "student").is_err());
}

#[test]
fn validate_register_input_rejects_short_password() {
    assert_eq!(
        validate_register_input("Budi", "budi@ajarin.id", "abc", "abc", "student").unwrap_err(),
        "Password must be at least 6 characters."
    );
}

#[test]
fn validate_register_input_rejects_mismatched_confirmation() {
    assert_eq!(
        validate_register_input("Budi", "budi@ajarin.id", "rahasia", "rahasia2", "student").unwrap_err(),
        "Passwords do not match."
    );
}

#[test]
fn validate_register_input_drops_unknown_role() {
    let request = validate_register_input("Budi", "budi@ajarin.id", "rahasia", "rahasia", "admin").unwrap();
    assert_eq!(request.role, None);
}
