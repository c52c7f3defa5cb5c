//! Documentation build entry point.
//!
//! Runs the whole pipeline once: load the parameter document, resolve merge
//! directives, render the rows, write the output file. Synchronous and
//! single-threaded; any failure aborts the build.

use std::fs;
use std::path::Path;

use crate::{
    config::Config,
    error::Result,
    render::{render_rows, RenderFormat, RenderOptions},
    table::ParameterTable,
};

use log::{debug, info};

/// Main entry point for a documentation build
pub fn generate(config: &Config) -> Result<()> {
    let format: RenderFormat = config.format.parse()?;

    // 1. Load and resolve the parameter table
    info!("loading parameter document from {}", config.parameters_path);
    let table = ParameterTable::from_file(&config.parameters_path)?;
    let resolved = table.resolve()?;
    debug!("resolved {} parameters", resolved.len());

    // 2. Render rows
    let options = RenderOptions {
        format,
        title: config.title.clone(),
        include: config.include_params.clone(),
        exclude: config.exclude_params.clone(),
    };
    let rendered = render_rows(&resolved, &options)?;

    // 3. Write the output file
    let output_path = Path::new(&config.output_path);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_path, rendered)?;
    info!("wrote {}", config.output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r#"
resource_provider_uuid:
  type: string
  in: path
  required: true
  description: The uuid of a resource provider.
allocation_ratio:
  type: float
  in: body
  required: true
  description: It is used in determining whether a provider has capacity left.
allocation_ratio_opt:
  base: allocation_ratio
  required: false
"#;

    #[test]
    fn test_generate_writes_rendered_rows() -> crate::Result<()> {
        let dir = tempdir()?;
        let params_path = dir.path().join("parameters.yaml");
        std::fs::write(&params_path, DOC)?;

        let mut config = Config::new(
            params_path.to_string_lossy().to_string(),
            dir.path()
                .join("build/parameters.inc")
                .to_string_lossy()
                .to_string(),
        );
        config.title = Some("Request".to_string());
        generate(&config)?;

        let out = std::fs::read_to_string(dir.path().join("build/parameters.inc"))?;
        assert!(out.starts_with(".. list-table:: Request"));
        assert!(out.contains("* - allocation_ratio_opt"));
        assert!(out.contains("optional"));
        Ok(())
    }

    #[test]
    fn test_generate_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("parameters.yaml");
        std::fs::write(&params_path, DOC).unwrap();

        let mut config = Config::new(
            params_path.to_string_lossy().to_string(),
            dir.path().join("out.inc").to_string_lossy().to_string(),
        );
        config.format = "markdown".to_string();
        let err = generate(&config).unwrap_err();
        assert!(err.to_string().contains("unknown render format"));
    }

    #[test]
    fn test_generate_aborts_on_bad_document() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("parameters.yaml");
        std::fs::write(&params_path, "a:\n  base: b\n").unwrap();

        let config = Config::new(
            params_path.to_string_lossy().to_string(),
            dir.path().join("out.inc").to_string_lossy().to_string(),
        );
        let err = generate(&config).unwrap_err();
        assert!(err.to_string().contains("unknown base 'b'"));
        assert!(!dir.path().join("out.inc").exists());
    }
}
