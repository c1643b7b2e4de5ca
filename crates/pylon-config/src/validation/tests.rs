use super::*;

#[test]
fn default_config_is_valid() {
    assert!(validate(&ChatConfig::new("abc")).is_ok());
}

#[test]
fn empty_app_id_rejected() {
    let err = validate(&ChatConfig::new("")).unwrap_err();
    assert!(err.to_string().contains("app_id must not be empty"));
}

#[test]
fn app_id_with_quote_rejected() {
    let err = validate(&ChatConfig::new("abc'); alert(1); //")).unwrap_err();
    assert!(err.to_string().contains("may only contain"));
}

#[test]
fn insecure_script_url_rejected() {
    let config = ChatConfig::builder("abc")
        .widget_script_url("http://evil.example.com/widget.js")
        .build();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("widget_script_url"));
}

#[test]
fn localhost_http_allowed_for_development() {
    let config = ChatConfig::builder("abc")
        .widget_base_url("http://localhost:3000")
        .widget_script_url("http://10.0.2.2:3000/widget/abc")
        .build();
    assert!(validate(&config).is_ok());
}

#[test]
fn bad_primary_color_rejected() {
    let config = ChatConfig::builder("abc")
        .primary_color("red; } * { display:none")
        .build();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("primary_color"));
}

#[test]
fn all_errors_are_collected() {
    let config = ChatConfig::builder("")
        .widget_base_url("ftp://files")
        .primary_color("nope!")
        .build();
    let msg = validate(&config).unwrap_err().to_string();
    assert!(msg.contains("app_id"));
    assert!(msg.contains("widget_base_url"));
    assert!(msg.contains("primary_color"));
}

#[test]
fn valid_user_passes() {
    let user = ChatUser::new("ada@example.com", "Ada").with_avatar_url("https://img/ada.png");
    assert!(validate_user(&user).is_ok());
}

#[test]
fn user_without_at_sign_rejected() {
    let err = validate_user(&ChatUser::new("ada", "Ada")).unwrap_err();
    assert!(err.to_string().contains("user.email"));
}

#[test]
fn user_with_blank_name_rejected() {
    let err = validate_user(&ChatUser::new("ada@example.com", " ")).unwrap_err();
    assert!(err.to_string().contains("user.name"));
}
