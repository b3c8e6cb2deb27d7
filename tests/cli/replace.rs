use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, DASHBOARD_VUE, stderr, stdout};

fn dashboard_project() -> Result<CliTest> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;
    test.write_file(
        "locales/en.json",
        &json!({
            "Commons": {
                "heading": { "welcome_home": "Welcome Home" },
                "placeholder": { "search_invoices": "Search invoices" },
                "button": { "save": "Save" }
            },
            "Pages": { "Dashboard": { "text": {
                "manage_your_invoices_and_payments": "Manage your invoices and payments"
            } } }
        })
        .to_string(),
    )?;
    Ok(test)
}

#[test]
fn test_replace_dry_run_leaves_files() -> Result<()> {
    let test = dashboard_project()?;

    let output = test.run(&["replace"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("src/pages/dashboard.vue: 4 replacement(s)"));
    assert!(out.contains("Would replace 4 string(s) in 1 file(s)."));
    assert!(out.contains("Run with --apply to rewrite these files."));
    assert_eq!(test.read_file("src/pages/dashboard.vue")?, DASHBOARD_VUE);

    Ok(())
}

#[test]
fn test_replace_apply_rewrites_sources() -> Result<()> {
    let test = dashboard_project()?;

    let output = test.run(&["replace", "--apply"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Replaced 4 string(s) in 1 file(s)."));

    assert_eq!(
        test.read_file("src/pages/dashboard.vue")?,
        r#"<template>
  <main>
    <h1>{{ $t('Commons.heading.welcome_home') }}</h1>
    <p>{{ $t('Pages.Dashboard.text.manage_your_invoices_and_payments') }}</p>
    <input :placeholder="$t('Commons.placeholder.search_invoices')" />
    <button>{{ $t('Commons.button.save') }}</button>
  </main>
</template>
"#
    );

    let again = test.run(&["replace", "--apply"])?;
    assert!(again.status.success());
    assert!(stdout(&again).contains("✓ Nothing to replace"));

    Ok(())
}

#[test]
fn test_replace_script_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/TrialBanner.tsx",
        r#"export function TrialBanner() {
  return <p title="Upgrade your plan">Your trial ends soon</p>;
}
"#,
    )?;
    test.write_file(
        "locales/en.json",
        &json!({
            "Components": { "TrialBanner": {
                "title": { "upgrade_your_plan": "Upgrade your plan" },
                "text": { "your_trial_ends_soon": "Your trial ends soon" }
            } }
        })
        .to_string(),
    )?;

    let output = test.run(&["replace", "--apply"])?;
    assert!(output.status.success());
    assert_eq!(
        test.read_file("src/components/TrialBanner.tsx")?,
        r#"export function TrialBanner() {
  return <p title={t('Components.TrialBanner.title.upgrade_your_plan')}>{t('Components.TrialBanner.text.your_trial_ends_soon')}</p>;
}
"#
    );

    Ok(())
}

#[test]
fn test_replace_without_default_locale_fails() -> Result<()> {
    let test = CliTest::with_file("src/pages/dashboard.vue", DASHBOARD_VUE)?;

    let output = test.run(&["replace"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Default locale file not found: locales/en.json"));

    Ok(())
}
