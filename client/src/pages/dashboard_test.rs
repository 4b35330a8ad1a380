use super::*;

fn user(role: Option<&str>) -> User {
    User {
        id: "1".to_owned(),
        name: "Budi Santoso".to_owned(),
        email: None,
        role: role.map(str::to_owned),
        avatar: None,
    }
}

#[test]
fn initials_takes_first_two_words() {
    assert_eq!(initials("Budi Santoso Wijaya"), "BS");
    assert_eq!(initials("budi"), "B");
    assert_eq!(initials("  "), "");
}

#[test]
fn role_label_defaults_to_student() {
    assert_eq!(role_label(&user(None)), "Student");
    assert_eq!(role_label(&user(Some("tutor"))), "Tutor");
}

#[test]
fn role_label_passes_unknown_roles_through() {
    assert_eq!(role_label(&user(Some("mentor"))), "mentor");
}
