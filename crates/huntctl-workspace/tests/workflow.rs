//! End-to-end workspace flow: init, create hunts, query the catalog,
//! export a context bundle.

use chrono::NaiveDate;
use tempfile::TempDir;

use huntctl_workspace::{
    create_hunt, Catalog, ContextBundle, ContextFilter, ContextFormat, HuntFilter, HuntSpec,
    Workspace,
};

fn spec(title: &str, technique: &str, tactic: &str) -> HuntSpec {
    HuntSpec {
        title: title.to_string(),
        hunter: Some("analyst".to_string()),
        techniques: vec![technique.to_string()],
        tactics: vec![tactic.to_string()],
        platforms: vec!["Linux".to_string()],
        ..Default::default()
    }
}

#[test]
fn init_create_validate_export() {
    let dir = TempDir::new().unwrap();
    let ws = Workspace::new(dir.path());
    ws.init().unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let (first, _) = create_hunt(&ws, &spec("Cron persistence", "T1053.003", "persistence"), date)
        .unwrap();
    let (second, _) = create_hunt(&ws, &spec("LSASS dumping", "T1003.001", "credential-access"), date)
        .unwrap();
    assert_eq!(first.as_str(), "H-0001");
    assert_eq!(second.as_str(), "H-0002");

    // Discovery finds the workspace from a nested directory.
    let nested = dir.path().join("hunts");
    let discovered = Workspace::discover(&nested).unwrap();
    assert_eq!(discovered.root(), ws.root());

    // Every generated hunt is schema-valid.
    let catalog = Catalog::new(&ws);
    let summary = catalog.validate_all().unwrap();
    assert_eq!(summary.total, 2);
    assert!(summary.all_passed());

    // Catalog views agree with what was created.
    let listed = catalog.list(&HuntFilter::default()).unwrap();
    assert_eq!(listed.len(), 2);
    let coverage = catalog.coverage().unwrap();
    assert_eq!(coverage["T1053.003"], vec!["H-0001"]);

    // A tactic-filtered context export carries exactly the matching hunt.
    let bundle = ContextBundle::build(
        &ws,
        &ContextFilter {
            tactic: Some("persistence".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let json = bundle.render(ContextFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let hunts = value["hunts"].as_array().unwrap();
    assert_eq!(hunts.len(), 1);
    assert_eq!(hunts[0]["hunt_id"], "H-0001");
}
