use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

fn two_locale_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "locales/en.json",
        &json!({
            "Commons": { "button": { "save": "Save" } },
            "Billing": { "heading": { "invoice_overview": "Invoice Overview" } }
        })
        .to_string(),
    )?;
    test.write_file(
        "locales/fr.json",
        &json!({ "Commons": { "button": { "save": "Enregistrer" } } }).to_string(),
    )?;
    Ok(test)
}

#[test]
fn test_sync_dry_run() -> Result<()> {
    let test = two_locale_project()?;
    let before = test.read_file("locales/fr.json")?;

    let output = test.run(&["sync"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("locales/fr.json: 1 missing key(s)"));
    assert!(out.contains("+ Billing.heading.invoice_overview"));
    assert!(out.contains("Would add 1 key(s) to 1 locale file(s)."));
    assert_eq!(test.read_file("locales/fr.json")?, before);

    Ok(())
}

#[test]
fn test_sync_apply_copies_default_text() -> Result<()> {
    let test = two_locale_project()?;

    let output = test.run(&["sync", "--apply"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Added 1 key(s) to 1 locale file(s)."));

    assert_eq!(
        test.read_json("locales/fr.json")?,
        json!({
            "Commons": { "button": { "save": "Enregistrer" } },
            "Billing": { "heading": { "invoice_overview": "Invoice Overview" } }
        })
    );

    let again = test.run(&["sync"])?;
    assert!(stdout(&again).contains("✓ All locales are in sync with 'en'"));

    Ok(())
}

#[test]
fn test_sync_creates_configured_locale() -> Result<()> {
    let test = two_locale_project()?;
    test.write_file(".autoglotrc.json", r#"{ "locales": ["de"] }"#)?;

    let output = test.run(&["sync", "--apply"])?;
    assert!(output.status.success());

    let de = test.read_json("locales/de.json")?;
    assert_eq!(de["Commons"]["button"]["save"], "Save");
    assert_eq!(de["Billing"]["heading"]["invoice_overview"], "Invoice Overview");
    // fr is not in the configured list
    assert_eq!(
        test.read_json("locales/fr.json")?,
        json!({ "Commons": { "button": { "save": "Enregistrer" } } })
    );

    Ok(())
}

#[test]
fn test_sync_with_default_locale_override() -> Result<()> {
    let test = two_locale_project()?;

    let output = test.run(&["sync", "--default-locale", "fr"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ All locales are in sync with 'fr'"));

    Ok(())
}

#[test]
fn test_sync_without_default_locale_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["sync"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Default locale file not found"));

    Ok(())
}
