use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ModuleId;

/// Pattern predicate of a rule or cache group. In config files a bare string
/// is a regex; globs and path prefixes use `{ "glob": … }` / `{ "path": … }`.
#[derive(Debug, Clone)]
pub enum RuleCondition {
  Regex(regex::Regex),
  Glob(String),
  Path(PathBuf),
}

impl RuleCondition {
  pub fn regex(pattern: &str) -> anyhow::Result<Self> {
    Ok(Self::Regex(regex::Regex::new(pattern)?))
  }

  pub fn glob(pattern: impl Into<String>) -> Self {
    Self::Glob(pattern.into())
  }

  pub fn path(prefix: impl Into<PathBuf>) -> Self {
    Self::Path(prefix.into())
  }

  pub fn matches(&self, id: &ModuleId) -> bool {
    match self {
      Self::Regex(regex) => regex.is_match(id),
      Self::Glob(pattern) => fast_glob::glob_match(pattern.as_bytes(), id.as_ref().as_bytes()),
      Self::Path(prefix) => Path::new(id.as_ref()).starts_with(prefix),
    }
  }

  /// Stable textual form, folded into the configuration fingerprint.
  pub fn pattern_source(&self) -> String {
    match self {
      Self::Regex(regex) => format!("re:{}", regex.as_str()),
      Self::Glob(pattern) => format!("glob:{pattern}"),
      Self::Path(prefix) => format!("path:{}", prefix.display()),
    }
  }
}

impl<'de> Deserialize<'de> for RuleCondition {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Pattern(String),
      Glob { glob: String },
      Path { path: PathBuf },
    }

    match Raw::deserialize(deserializer)? {
      Raw::Pattern(pattern) => RuleCondition::regex(&pattern).map_err(serde::de::Error::custom),
      Raw::Glob { glob } => Ok(RuleCondition::Glob(glob)),
      Raw::Path { path } => Ok(RuleCondition::Path(path)),
    }
  }
}

/// Asset classes may use different inline thresholds and naming templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
  Image,
  Font,
  Other,
}

/// One configured rule: a predicate plus the ordered transforms it wires in.
/// Immutable once options are normalized.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
  /// Diagnostic label; defaults to the test pattern when absent.
  #[serde(default)]
  pub name: Option<String>,
  pub test: RuleCondition,
  #[serde(default)]
  pub include: Vec<RuleCondition>,
  #[serde(default)]
  pub exclude: Vec<RuleCondition>,
  #[serde(default)]
  pub transforms: Vec<String>,
  /// Marks matched modules as emitted assets instead of script modules.
  #[serde(default)]
  pub asset: Option<AssetClass>,
  #[serde(default)]
  pub side_effects: bool,
}

impl ModuleRule {
  pub fn label(&self) -> &str {
    self.name.as_deref().unwrap_or("<unnamed rule>")
  }

  /// Exclude predicates take precedence over include predicates.
  pub fn matches(&self, id: &ModuleId) -> bool {
    if !self.test.matches(id) {
      return false;
    }
    if self.exclude.iter().any(|condition| condition.matches(id)) {
      return false;
    }
    self.include.is_empty() || self.include.iter().any(|condition| condition.matches(id))
  }
}
