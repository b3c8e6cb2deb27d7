use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, DASHBOARD_VUE};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .autoglotrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".autoglotrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "src");
    assert_eq!(parsed["localesRoot"], "locales");
    assert_eq!(parsed["defaultLocale"], "en");
    assert!(parsed["translatableAttributes"].is_array());
    assert!(content.ends_with("}\n"));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".autoglotrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .autoglotrc.json already exists
    ");

    assert_eq!(test.read_file(".autoglotrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["extract", "--apply"])?;
    assert!(
        output.status.success(),
        "extract should work with the initialized config. stderr: {}",
        crate::stderr(&output)
    );
    assert!(test.root().join("locales/en.json").exists());

    Ok(())
}
