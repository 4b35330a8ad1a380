use super::*;

// =============================================================
// User decoding
// =============================================================

#[test]
fn user_numeric_id_is_normalized_to_string() {
    let user: User = serde_json::from_value(serde_json::json!({ "id": 1, "name": "Budi" })).unwrap();
    assert_eq!(user.id, "1");
    assert_eq!(user.name, "Budi");
    assert_eq!(user.email, None);
}

#[test]
fn user_accepts_mongo_style_id() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "65f0c0ffee",
        "name": "Sari",
        "email": "sari@ajarin.id",
        "role": "tutor",
        "createdAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(user.id, "65f0c0ffee");
    assert_eq!(user.role.as_deref(), Some("tutor"));
}

#[test]
fn user_rejects_fractional_id() {
    let result = serde_json::from_value::<User>(serde_json::json!({ "id": 1.5, "name": "X" }));
    assert!(result.is_err());
}

#[test]
fn user_rejects_empty_string_id() {
    let result = serde_json::from_value::<User>(serde_json::json!({ "id": "", "name": "X" }));
    assert!(result.is_err());
}

#[test]
fn user_serializes_without_absent_optionals() {
    let user = User {
        id: "1".to_owned(),
        name: "Budi".to_owned(),
        email: None,
        role: None,
        avatar: None,
    };
    assert_eq!(
        serde_json::to_value(&user).unwrap(),
        serde_json::json!({ "id": "1", "name": "Budi" })
    );
}

// =============================================================
// Redaction
// =============================================================

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials::new("x@ajarin.id", "hunter2");
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("x@ajarin.id"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn register_request_debug_redacts_password() {
    let req = RegisterRequest {
        name: "Budi".to_owned(),
        email: "budi@ajarin.id".to_owned(),
        password: "rahasia".to_owned(),
        role: Some("student".to_owned()),
    };
    assert!(!format!("{req:?}").contains("rahasia"));
}

// =============================================================
// Envelopes
// =============================================================

#[test]
fn envelope_defaults_missing_fields() {
    let env: ApiEnvelope<AuthPayload> = serde_json::from_str("{}").unwrap();
    assert!(!env.success);
    assert_eq!(env.message, None);
    assert_eq!(env.data, None);
}

#[test]
fn envelope_decodes_payload_without_default_impl() {
    let env: ApiEnvelope<UserData> =
        serde_json::from_str(r#"{ "success": true, "data": { "user": { "id": 3, "name": "Sari" } } }"#).unwrap();
    assert!(env.success);
    assert_eq!(env.data.map(User::from).map(|u| u.id).as_deref(), Some("3"));

    let empty: ApiEnvelope<UserData> = serde_json::from_str(r#"{ "success": false }"#).unwrap();
    assert!(empty.data.is_none());
}

#[test]
fn user_data_accepts_wrapped_and_bare_shapes() {
    let wrapped: UserData = serde_json::from_value(serde_json::json!({ "user": { "id": 2, "name": "A" } })).unwrap();
    let bare: UserData = serde_json::from_value(serde_json::json!({ "id": 2, "name": "A" })).unwrap();
    assert_eq!(User::from(wrapped), User::from(bare));
}

#[test]
fn error_body_prefers_message_then_error() {
    let body = ErrorBody {
        message: Some("  ".to_owned()),
        error: Some("Email already registered".to_owned()),
    };
    assert_eq!(body.into_message().as_deref(), Some("Email already registered"));
    assert_eq!(ErrorBody::default().into_message(), None);
}
