//! Configuration file schema for shelldoc.
//!
//! A configuration chooses where documentation pages come from, which
//! sources are consulted in which order, and which inspections a project
//! run switches off. Everything is optional; an empty file means "built-in
//! pack, standard sources, every inspection".

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::diagnostics::DiagnosticsSink;
use crate::docs::{BuiltinCommandPolicy, BundledDocSource, DocumentationChain, ExternalCommandPolicy};
use crate::inspections::InspectionSettings;
use crate::resource::{
    DirectoryStore, EmbeddedStore, ResourceStore, TextLoader, EXTERNAL_PREFIX, INTERNAL_PREFIX,
};

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["shelldoc.yaml", ".shelldoc.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub inspections: InspectionSettings,
}

/// Where documentation comes from.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DocsConfig {
    /// Directory holding `<prefix>/<key>.html` pages. Absent = built-in pack.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Sources in priority order. Empty = builtin then external.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// One documentation source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    /// Defaults to the kind's stock prefix.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl SourceConfig {
    pub fn prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .unwrap_or_else(|| self.kind.default_prefix())
    }
}

/// Which command policy a source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Shell builtins.
    Builtin,
    /// Commands that are not builtins.
    External,
}

impl SourceKind {
    pub fn default_prefix(&self) -> &'static str {
        match self {
            SourceKind::Builtin => INTERNAL_PREFIX,
            SourceKind::External => EXTERNAL_PREFIX,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    ///
    /// A relative `docs.root` is resolved against the file's directory.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse_str(&content)?;

        if let Some(root) = &config.docs.root {
            if root.is_relative() {
                if let Some(parent) = path.parent() {
                    config.docs.root = Some(parent.join(root));
                }
            }
        }
        Ok(config)
    }

    /// Parse a configuration from YAML text.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // serde_yaml rejects an empty document as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The resource store selected by `docs.root`.
    pub fn store(&self) -> Arc<dyn ResourceStore> {
        match &self.docs.root {
            Some(root) => Arc::new(DirectoryStore::new(root)),
            None => Arc::new(EmbeddedStore::builtin()),
        }
    }

    /// Build the documentation chain described by this configuration.
    pub fn build_chain(&self, diagnostics: Arc<dyn DiagnosticsSink>) -> DocumentationChain {
        let loader = TextLoader::new(self.store(), diagnostics);

        if self.docs.sources.is_empty() {
            return DocumentationChain::standard(loader);
        }

        let mut chain = DocumentationChain::new();
        for source in &self.docs.sources {
            chain = match source.kind {
                SourceKind::Builtin => chain.with_source(BundledDocSource::new(
                    source.name.clone(),
                    source.prefix(),
                    BuiltinCommandPolicy,
                    loader.clone(),
                )),
                SourceKind::External => chain.with_source(BundledDocSource::new(
                    source.name.clone(),
                    source.prefix(),
                    ExternalCommandPolicy,
                    loader.clone(),
                )),
            };
        }
        chain
    }
}

/// Validate a configuration.
///
/// Duplicate source names are allowed; see
/// [`DocumentationChain::duplicate_source_names`].
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(root) = &config.docs.root {
        if !root.is_dir() {
            anyhow::bail!("docs root {:?} is not a directory", root);
        }
    }

    for source in &config.docs.sources {
        if source.name.trim().is_empty() {
            anyhow::bail!("documentation source with empty name");
        }
        if let Some(prefix) = &source.prefix {
            if prefix.trim().is_empty() {
                anyhow::bail!("documentation source {:?} has an empty prefix", source.name);
            }
            if crate::resource::normalize_path(prefix).is_none() {
                anyhow::bail!(
                    "documentation source {:?} has an invalid prefix {:?}",
                    source.name,
                    prefix
                );
            }
        }
    }

    for pattern in &config.inspections.disabled {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid disabled inspection pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

/// Find a configuration file: the current directory first, then the user
/// configuration directory.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = cwd.join(name);
        if path.is_file() {
            return Some(path);
        }
    }

    let user = ProjectDirs::from("", "", "shelldoc")?
        .config_dir()
        .join(DEFAULT_CONFIG_NAMES[0]);
    user.is_file().then_some(user)
}

/// Starter configuration written by `shelldoc init`.
pub const TEMPLATE: &str = include_str!("templates/shelldoc.yaml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::Construct;
    use crate::diagnostics::NullSink;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
docs:
  sources:
    - name: builtins
      kind: builtin
    - name: tools
      kind: external
      prefix: pages/tools
inspections:
  disabled: ["convert_*"]
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.docs.sources.len(), 2);
        assert_eq!(config.docs.sources[0].prefix(), INTERNAL_PREFIX);
        assert_eq!(config.docs.sources[1].prefix(), "pages/tools");
        assert_eq!(config.inspections.disabled, vec!["convert_*"]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse_str("  \n").unwrap();
        assert!(config.docs.root.is_none());
        assert!(config.docs.sources.is_empty());
        assert!(config.inspections.disabled.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let yaml = r#"
docs:
  sources:
    - name: x
      kind: manpage
"#;
        assert!(Config::parse_str(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_prefix_and_glob() {
        let mut config = Config::parse_str(
            r#"
docs:
  sources:
    - name: x
      kind: builtin
      prefix: "../outside"
"#,
        )
        .unwrap();
        assert!(validate(&config).is_err());

        config.docs.sources.clear();
        config.inspections.disabled = vec!["[".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = Config {
            docs: DocsConfig {
                root: Some(PathBuf::from("/nonexistent/shelldoc/docs")),
                sources: vec![],
            },
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_relative_root_resolves_against_file() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages/documentation/internal");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("echo.html"), "<p>local echo</p>").unwrap();
        let config_path = temp.path().join("shelldoc.yaml");
        fs::write(&config_path, "docs:\n  root: pages\n").unwrap();

        let config = Config::parse_file(&config_path).unwrap();
        assert_eq!(config.docs.root, Some(temp.path().join("pages")));
        assert!(validate(&config).is_ok());

        let chain = config.build_chain(Arc::new(NullSink));
        assert_eq!(
            chain.resolve(&Construct::command("echo"), None),
            Some("<p>local echo</p>".to_string())
        );
    }

    #[test]
    fn test_build_chain_respects_source_order() {
        let config = Config::parse_str(
            r#"
docs:
  sources:
    - name: second
      kind: external
    - name: first
      kind: builtin
"#,
        )
        .unwrap();
        let chain = config.build_chain(Arc::new(NullSink));
        let names: Vec<_> = chain.sources().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_discover_in_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".shelldoc.yaml"), "version: \"1\"\n").unwrap();
        assert_eq!(discover(temp.path()), Some(temp.path().join(".shelldoc.yaml")));
    }

    #[test]
    fn test_template_parses_and_validates() {
        let config = Config::parse_str(TEMPLATE).unwrap();
        assert!(validate(&config).is_ok());
    }
}
