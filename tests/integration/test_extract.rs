//! Tests for the `extract` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_extract_exports_name_and_version() -> Result<()> {
  let project = TestProject::with_manifest("mmc-cli", "1.2.3")?;

  let output = project.run_ok(&["extract"], &[])?;
  let out = stdout(&output);
  assert!(out.contains("mmc-cli"), "stdout: {}", out);
  assert!(out.contains("1.2.3"), "stdout: {}", out);

  assert_eq!(
    project.exported()?,
    vec![
      ("NAME".to_string(), "mmc-cli".to_string()),
      ("VERSION".to_string(), "1.2.3".to_string()),
    ]
  );
  // extract never sets a step output
  assert!(project.outputs()?.is_empty());

  Ok(())
}

#[test]
fn test_extract_without_name_exports_empty_name() -> Result<()> {
  let project = TestProject::new()?;
  project.write_manifest(".{\n    .version = \"0.9.0-beta\",\n}\n")?;

  project.run_ok(&["extract"], &[])?;

  assert_eq!(
    project.exported()?,
    vec![
      ("NAME".to_string(), String::new()),
      ("VERSION".to_string(), "0.9.0-beta".to_string()),
    ]
  );

  Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
  let project = TestProject::new()?;
  project.write_manifest(".version = \"1.0.0\",\n.version = \"1.1.0\",\n")?;

  let output = project.run_ok(&["extract", "--json"], &[])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["version"], "1.1.0");
  assert!(json["name"].is_null());
  assert!(json["manifest"].as_str().unwrap().ends_with("build.zig.zon"));

  Ok(())
}

#[test]
fn test_extract_missing_manifest_fails() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run(&["extract"], &[])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Failed to read manifest"));
  assert!(project.exported()?.is_empty());

  Ok(())
}

#[test]
fn test_extract_manifest_flag() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("pkg/build.zig.zon", &zon_manifest("pkg", "4.5.6"))?;

  project.run_ok(&["extract", "--manifest", "pkg/build.zig.zon"], &[])?;

  assert_eq!(project.exported()?[1], ("VERSION".to_string(), "4.5.6".to_string()));

  Ok(())
}

#[test]
fn test_extract_config_overrides() -> Result<()> {
  let project = TestProject::with_manifest("from-manifest", "2.0.0")?;
  project.write_file(
    "zon-release.toml",
    r#"name = "mmc-cli"

[export]
name_var = "name"
"#,
  )?;

  project.run_ok(&["extract"], &[])?;

  assert_eq!(
    project.exported()?,
    vec![
      ("name".to_string(), "mmc-cli".to_string()),
      ("VERSION".to_string(), "2.0.0".to_string()),
    ]
  );

  Ok(())
}

#[test]
fn test_extract_invalid_config_fails() -> Result<()> {
  let project = TestProject::with_manifest("mmc-cli", "1.0.0")?;
  project.write_file("zon-release.toml", "[export]\nname_var = \"\"\n")?;

  let output = project.run(&["extract"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid exported variable name"));

  Ok(())
}

#[test]
fn test_extract_without_github_env_prints_assignments() -> Result<()> {
  let project = TestProject::with_manifest("mmc-cli", "1.2.3")?;

  let output = project.run_ok(&["extract"], &[("GITHUB_ENV", "")])?;

  let err = stderr(&output);
  assert!(err.contains("NAME=mmc-cli"), "stderr: {}", err);
  assert!(err.contains("VERSION=1.2.3"), "stderr: {}", err);
  assert!(project.exported()?.is_empty());

  Ok(())
}
