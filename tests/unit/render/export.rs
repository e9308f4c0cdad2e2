use super::*;
use crate::render::batch::{FailureReason, RenderFailure, RenderOutcome};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "bannerforge_export_{tag}_{}_{nanos}",
        std::process::id()
    ))
}

#[test]
fn file_names_are_flat() {
    assert_eq!(archive_file_name("Summer Sale", "Acme Shop"), "Summer_Sale_Acme_Shop.png");
    assert_eq!(archive_file_name("b", "../x/y"), "b_..xy.png");
}

#[test]
fn writes_only_successes() {
    let dir = temp_dir("write");
    let recipients = vec![Recipient::new("1", "Acme Shop"), Recipient::new("2", "Beta")];
    let report = BatchReport {
        outcomes: vec![
            RenderOutcome {
                recipient_id: "1".into(),
                result: Ok(vec![1, 2, 3]),
            },
            RenderOutcome {
                recipient_id: "2".into(),
                result: Err(RenderFailure {
                    reason: FailureReason::MissingLogo,
                    message: "no logo".into(),
                }),
            },
        ],
    };
    let written = write_outputs(&dir, "banner", &report, &recipients).unwrap();
    assert_eq!(written, vec![dir.join("banner_Acme_Shop.png")]);
    assert_eq!(std::fs::read(&written[0]).unwrap(), vec![1, 2, 3]);

    let report_path = dir.join("report.json");
    write_report(&report_path, &report).unwrap();
    let rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(rows[1]["success"], false);

    assert!(write_outputs(&dir, "banner", &report, &recipients[..1]).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn colliding_names_get_numbered() {
    let dir = temp_dir("collide");
    let recipients = vec![
        Recipient::new("a", "Acme Shop"),
        Recipient::new("b", "Acme_Shop"),
        Recipient::new("c", "acme shop"),
        Recipient::new("d", "Acme Shop_2"),
    ];
    let report = BatchReport {
        outcomes: recipients
            .iter()
            .enumerate()
            .map(|(i, r)| RenderOutcome {
                recipient_id: r.id.clone(),
                result: Ok(vec![i as u8]),
            })
            .collect(),
    };
    let written = write_outputs(&dir, "banner", &report, &recipients).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "banner_Acme_Shop.png",
            "banner_Acme_Shop_2.png",
            "banner_acme_shop_3.png",
            "banner_Acme_Shop_2_2.png",
        ]
    );
    // Every success kept its own bytes.
    for (i, path) in written.iter().enumerate() {
        assert_eq!(std::fs::read(path).unwrap(), vec![i as u8]);
    }
    let _ = std::fs::remove_dir_all(&dir);
}
