use super::*;

fn acme() -> Recipient {
    Recipient {
        id: "shop-1".to_string(),
        name: "Acme".to_string(),
        logo: None,
        address: "1 Main St".to_string(),
        phone: "555-1212".to_string(),
        email: "acme@example.com".to_string(),
    }
}

#[test]
fn substitutes_all_known_tokens() {
    let out = personalize("Hi {{shopName}}, call {{phone}}", &acme());
    assert_eq!(out, "Hi Acme, call 555-1212");
    assert!(!out.contains("{{"));

    let out = personalize("{{shopName}}/{{address}}/{{email}}/{{shopName}}", &acme());
    assert_eq!(out, "Acme/1 Main St/acme@example.com/Acme");
}

#[test]
fn unknown_tokens_pass_through() {
    let out = personalize("{{owner}} at {{shopName}} {{", &acme());
    assert_eq!(out, "{{owner}} at Acme {{");
    assert_eq!(personalize("", &acme()), "");
    assert_eq!(personalize("plain", &acme()), "plain");
}

#[test]
fn substituted_values_are_not_rescanned() {
    let mut r = acme();
    r.name = "{{phone}}".to_string();
    assert_eq!(personalize("{{shopName}}", &r), "{{phone}}");
}

#[test]
fn message_template_defaults_render() {
    let msg = MessageTemplate::default().render_for(&acme());
    assert_eq!(msg.to, "acme@example.com");
    assert_eq!(msg.subject, "Your Personalized Banner is Here!");
    assert!(msg.body.starts_with("Hi Acme,\n\n"));
}

#[test]
fn token_text_matches_display() {
    for p in Placeholder::ALL {
        assert_eq!(p.to_string(), p.token());
        assert!(p.token().starts_with("{{") && p.token().ends_with("}}"));
    }
}
