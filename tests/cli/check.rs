use anyhow::Result;
use serde_json::json;

use crate::{CliTest, DASHBOARD_VUE, stdout};

#[test]
fn test_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["check", "hardcoded"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"Manage your invoices and payments\"  hardcoded"));
    assert!(out.contains("--> src/pages/dashboard.vue:4:8"));
    assert!(out.contains("4 |     <p>Manage your invoices and payments</p>"));
    assert!(out.contains(
        "= hint: run `autoglot extract` to add it as `Pages.Dashboard.text.manage_your_invoices_and_payments`"
    ));
    assert!(out.contains("✘ 4 problems (4 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;
    test.run(&["extract", "--apply"])?;
    let en = test.read_file("locales/en.json")?;
    test.write_file("locales/fr.json", &en)?;

    let output = test.run(&["check"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Checked 1 source file, 2 locale files - no issues found"));

    Ok(())
}

#[test]
fn test_missing_locale_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "locales/en.json",
        &json!({ "Commons": { "button": { "save": "Save", "cancel": "Cancel" } } }).to_string(),
    )?;
    test.write_file(
        "locales/fr.json",
        &json!({ "Commons": { "button": { "save": "Enregistrer" } } }).to_string(),
    )?;

    let output = test.run(&["check", "missing-locale-key"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"Commons.button.cancel\"  missing-locale-key"));
    assert!(out.contains("--> locales/fr.json"));
    assert!(out.contains("= note: missing in 'fr', default text: \"Cancel\""));
    assert!(!out.contains("Commons.button.save\""));

    Ok(())
}

#[test]
fn test_parse_error_is_a_warning() -> Result<()> {
    let test = CliTest::with_file("src/broken.ts", "export const banner = {\n  title: \"Oops\",\n")?;

    let output = test.run(&["check", "parse-error"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("warning: \"script content could not be parsed; nothing was extracted\"  parse-error"));
    assert!(out.contains("--> src/broken.ts"));
    assert!(out.contains("✘ 1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".autoglotrc.json",
        r#"{ "ignores": ["**/generated/**"], "ignoreTexts": ["Welcome Home"] }"#,
    )?;
    test.write_file("src/generated/page.vue", DASHBOARD_VUE)?;
    test.write_file(
        "src/Home.vue",
        "<template>\n  <h1>Welcome Home</h1>\n</template>\n",
    )?;

    let output = test.run(&["check", "hardcoded"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Checked 1 source file - no issues found"));

    Ok(())
}

#[test]
fn test_repeated_rule_reports_once() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["check", "hardcoded", "parse-error", "hardcoded"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✘ 4 problems (4 errors, 0 warnings)"));

    Ok(())
}
