use super::*;

#[test]
fn parses_records_and_filters_active() {
    let json = r#"[
        {"id": "a", "name": "Alpha", "logo": "logos/a.png", "status": "active"},
        {"id": "b", "name": "Beta", "status": "suspended"},
        {"id": "c", "name": "Gamma", "logoAssetRef": "logos/c.png", "phone": "123"}
    ]"#;
    let records: Vec<RecipientRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records[1].status, RecipientStatus::Suspended);
    assert_eq!(records[2].status, RecipientStatus::Active);

    let active = active_recipients(records);
    let names: Vec<&str> = active.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Gamma"]);
    assert_eq!(active[1].logo.as_deref(), Some("logos/c.png"));
    assert_eq!(active[1].phone, "123");
}

#[test]
fn blank_logo_counts_as_absent() {
    let r = Recipient::new("x", "X").with_logo("   ");
    assert_eq!(r.logo_ref(), None);
    let r = Recipient::new("x", "X").with_logo("logo.png");
    assert_eq!(r.logo_ref(), Some("logo.png"));
    assert_eq!(Recipient::new("x", "X").logo_ref(), None);
}
