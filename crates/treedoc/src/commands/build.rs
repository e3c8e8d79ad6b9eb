//! `treedoc build` command implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;
use treedoc_config::{CliSettings, Config};
use treedoc_site::{FsWriter, GenerateSummary, RenderConfig, SiteGenerator};
use treedoc_tree::ElementTree;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// JSON element tree to document (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page file extension without the leading dot (overrides config).
    #[arg(short, long)]
    extension: Option<String>,

    /// Show attribute annotations in metadata tables.
    #[arg(long)]
    export_attributes: bool,

    /// Path to configuration file (default: auto-discover treedoc.toml).
    #[arg(short, long, env = "TREEDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (generation progress logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the tree cannot be loaded,
    /// or any page cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            output_dir: self.output_dir,
            extension: self.extension,
            export_attributes: self.export_attributes.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!("Input: {}", config.require_tree()?.display()));
        output.info(&format!("Output: {}", config.output_resolved.dir.display()));

        let summary = build_site(&config)?;

        output.success(&format!(
            "Generated {} pages in {} directories to {}",
            summary.pages,
            summary.directories,
            config.output_resolved.dir.display()
        ));
        Ok(())
    }
}

/// Load the configured tree and generate the site on disk.
fn build_site(config: &Config) -> Result<GenerateSummary, CliError> {
    let tree_path = config.require_tree()?;
    let file = File::open(tree_path).map_err(|source| CliError::Input {
        path: tree_path.to_path_buf(),
        source,
    })?;
    let tree = ElementTree::from_reader(BufReader::new(file))?;
    tracing::info!(path = %tree_path.display(), nodes = tree.len(), "Loaded element tree");

    let render_config = RenderConfig {
        export_attributes: config.output_resolved.export_attributes,
        extension: config.output_resolved.extension.clone(),
    };
    let writer = FsWriter::new(&config.output_resolved.dir);
    Ok(SiteGenerator::new(&writer, render_config).generate(&tree)?)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const TREE_JSON: &str = r#"{
        "name": "Project",
        "children": [
            {
                "name": "Core",
                "info": { "kind": "namespace", "name": "Core" },
                "children": [
                    {
                        "name": "Run",
                        "info": {
                            "kind": "function",
                            "name": "Run(int times)",
                            "type": "void",
                            "visibility": "public",
                            "attributes": "[Pure]",
                            "summary": "<summary>Runs.</summary><param name=\"times\">count</param>"
                        }
                    }
                ]
            }
        ]
    }"#;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("treedoc.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_build_site_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("tree.json"), TREE_JSON).unwrap();
        let config_path = write_config(
            temp_dir.path(),
            "[input]\ntree = \"tree.json\"\n\n[output]\ndir = \"out\"\nexport_attributes = true\n",
        );
        let config = Config::load(Some(&config_path), None).unwrap();

        let summary = build_site(&config).unwrap();

        assert_eq!(
            summary,
            GenerateSummary {
                pages: 3,
                directories: 2
            }
        );
        let out = temp_dir.path().join("out");
        assert!(out.join("style.css").is_file());
        assert!(out.join("index.html").is_file());
        let run = fs::read_to_string(out.join("Core/Run.html")).unwrap();
        assert!(run.contains("<td>[Pure]</td>"));
        assert!(run.contains("int <b>times</b>"));
    }

    #[test]
    fn test_build_site_cli_extension_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("tree.json"), TREE_JSON).unwrap();
        let config_path = write_config(temp_dir.path(), "[input]\ntree = \"tree.json\"\n");
        let settings = CliSettings {
            extension: Some("htm".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        build_site(&config).unwrap();

        let out = temp_dir.path().join("site");
        assert!(out.join("Core/index.htm").is_file());
        assert!(out.join("Core/Run.htm").is_file());
        let run = fs::read_to_string(out.join("Core/Run.htm")).unwrap();
        assert!(!run.contains("[Pure]"));
    }

    #[test]
    fn test_build_site_missing_tree_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(temp_dir.path(), "[input]\ntree = \"missing.json\"\n");
        let config = Config::load(Some(&config_path), None).unwrap();

        let err = build_site(&config).unwrap_err();

        assert!(matches!(err, CliError::Input { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_build_site_invalid_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("tree.json"), "{ not json").unwrap();
        let config_path = write_config(temp_dir.path(), "[input]\ntree = \"tree.json\"\n");
        let config = Config::load(Some(&config_path), None).unwrap();

        let err = build_site(&config).unwrap_err();

        assert!(matches!(err, CliError::Tree(_)));
    }

    #[test]
    fn test_build_site_refuses_names_outside_output_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("tree.json"),
            r#"{"name": "Project", "children": [{"name": "../escaped", "info": {"kind": "function"}}]}"#,
        )
        .unwrap();
        let config_path = write_config(temp_dir.path(), "[input]\ntree = \"tree.json\"\n");
        let config = Config::load(Some(&config_path), None).unwrap();

        let err = build_site(&config).unwrap_err();

        assert!(matches!(err, CliError::Tree(_)));
        assert!(!temp_dir.path().join("escaped.html").exists());
        assert!(!temp_dir.path().join("site").exists());
    }
}
