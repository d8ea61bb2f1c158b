//! Extract command implementation

use crate::core::context::RunContext;
use crate::core::error::ZonResult;
use crate::manifest::ManifestFields;
use serde::Serialize;
use std::path::PathBuf;

/// Fields as handed to later steps
#[derive(Debug, Serialize)]
pub struct ExtractReport {
  pub manifest: PathBuf,
  /// Name here is already the exported one (config override applied)
  #[serde(flatten)]
  pub fields: ManifestFields,
}

/// Run the extract command
pub fn run_extract(ctx: &RunContext, json: bool) -> ZonResult<()> {
  let report = extract_and_export(ctx)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!("📦 {}", report.manifest.display());
    println!("   Name:    {}", report.fields.name.as_deref().unwrap_or("(not set)"));
    println!("   Version: {}", report.fields.version.as_deref().unwrap_or("(not set)"));
  }

  Ok(())
}

/// Read the manifest and export name/version for later steps.
///
/// Missing fields are exported as empty values rather than failing.
pub(crate) fn extract_and_export(ctx: &RunContext) -> ZonResult<ExtractReport> {
  let mut fields = ManifestFields::load(&ctx.manifest_path)?;
  fields.name = ctx.package_name(fields.name.as_deref()).map(str::to_string);

  let export = &ctx.config.export;
  ctx
    .exporter
    .export_variable(&export.name_var, fields.name.as_deref().unwrap_or_default())?;
  ctx
    .exporter
    .export_variable(&export.version_var, fields.version.as_deref().unwrap_or_default())?;

  Ok(ExtractReport {
    manifest: ctx.manifest_path.clone(),
    fields,
  })
}
