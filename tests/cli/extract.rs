use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, DASHBOARD_VUE, stdout};

#[test]
fn test_extract_dry_run_lists_new_keys() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["extract"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("src/pages/dashboard.vue (Pages.Dashboard): 4 item(s), 4 new key(s)"));
    assert!(out.contains("+ Commons.heading.welcome_home = \"Welcome Home\""));
    assert!(out.contains(
        "+ Pages.Dashboard.text.manage_your_invoices_and_payments = \"Manage your invoices and payments\""
    ));
    assert!(out.contains("Would add 4 key(s) to locales/en.json."));
    assert!(out.contains("Run with --apply to write them."));
    assert!(!test.root().join("locales/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_apply_writes_default_locale() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["extract", "--apply"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Added 4 key(s) to locales/en.json."));

    let en = test.read_json("locales/en.json")?;
    assert_eq!(en["Commons"]["heading"]["welcome_home"], "Welcome Home");
    assert_eq!(en["Commons"]["placeholder"]["search_invoices"], "Search invoices");
    assert_eq!(en["Commons"]["button"]["save"], "Save");
    assert_eq!(
        en["Pages"]["Dashboard"]["text"]["manage_your_invoices_and_payments"],
        "Manage your invoices and payments"
    );
    assert!(test.read_file("locales/en.json")?.ends_with("}\n"));

    let again = test.run(&["extract", "--apply"])?;
    assert!(stdout(&again).contains("✓ No new keys for locales/en.json"));

    Ok(())
}

#[test]
fn test_extract_suffixes_colliding_keys() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;
    test.write_file(
        "locales/en.json",
        &json!({
            "Pages": { "Dashboard": { "text": {
                "manage_your_invoices_and_payments": "Manage your invoices and payments."
            } } }
        })
        .to_string(),
    )?;

    let output = test.run(&["extract", "--apply"])?;
    assert!(output.status.success());

    let en = test.read_json("locales/en.json")?;
    let texts = &en["Pages"]["Dashboard"]["text"];
    assert_eq!(
        texts["manage_your_invoices_and_payments"],
        "Manage your invoices and payments."
    );
    assert_eq!(
        texts["manage_your_invoices_and_payments_2"],
        "Manage your invoices and payments"
    );

    Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;
    test.write_file(
        "src/components/TrialBanner.tsx",
        r#"export function TrialBanner() {
  return <p title="Upgrade your plan">Your trial ends soon</p>;
}
"#,
    )?;

    let output = test.run(&["extract", "--json"])?;
    assert!(output.status.success());

    let files: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    let files = files.as_array().expect("array of files");
    assert_eq!(files.len(), 2);

    assert_eq!(files[0]["path"], "src/components/TrialBanner.tsx");
    assert_eq!(files[0]["namespace"], "Components.TrialBanner");
    let attribute = files[0]["items"]
        .as_array()
        .expect("items")
        .iter()
        .find(|item| item["type"] == "attribute")
        .expect("title attribute item");
    assert_eq!(attribute["text"], "Upgrade your plan");
    assert_eq!(attribute["kind"], "title");
    assert_eq!(attribute["attributeName"], "title");
    assert_eq!(attribute["line"], 2);

    assert_eq!(files[1]["path"], "src/pages/dashboard.vue");
    let texts: Vec<&str> = files[1]["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["text"].as_str())
        .collect();
    assert!(texts.contains(&"Welcome Home"));
    assert!(texts.contains(&"Search invoices"));
    assert!(!test.root().join("locales/en.json").exists());

    Ok(())
}
