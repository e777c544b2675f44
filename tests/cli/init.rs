use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["cache"], "loc.cache");
    assert_eq!(parsed["regionProperty"], "landskap");
    assert_eq!(
        parsed["regions"],
        serde_json::json!(["Västergötland", "Bohuslän", "Dalsland"])
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .tunemaprc.json"));

    let content = test.read_file(".tunemaprc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tunemaprc.json", "{}")?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".tunemaprc.json already exists"));
    assert_eq!(test.read_file(".tunemaprc.json")?, "{}");

    Ok(())
}
