use std::sync::LazyLock;

use fastpack_utils::indexmap::FxIndexSet;
use regex::Regex;

static STATIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^\s*import\s+(?:[\w$*{},\s]+?from\s+)?["']([^"']+)["']"#)
    .expect("static pattern")
});
static EXPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^\s*export\s+[\w$*{},\s]+?from\s+["']([^"']+)["']"#).expect("static pattern")
});
static REQUIRE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\brequire\(\s*["']([^"']+)["']\s*\)"#).expect("static pattern"));
static DYNAMIC_IMPORT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\bimport\(\s*["']([^"']+)["']\s*\)"#).expect("static pattern"));

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScannedImports {
  pub static_specifiers: Vec<String>,
  pub dynamic_specifiers: Vec<String>,
}

/// Lexical import scan over transformed source. Only string-literal
/// specifiers are recognized; computed specifiers are invisible to the
/// graph, matching a plain static analysis.
pub fn scan_imports(source: &str) -> ScannedImports {
  let mut static_specifiers = FxIndexSet::default();
  let mut dynamic_specifiers = FxIndexSet::default();

  for captures in STATIC_IMPORT_RE.captures_iter(source) {
    static_specifiers.insert(captures[1].to_string());
  }
  for captures in EXPORT_FROM_RE.captures_iter(source) {
    static_specifiers.insert(captures[1].to_string());
  }
  for captures in REQUIRE_RE.captures_iter(source) {
    static_specifiers.insert(captures[1].to_string());
  }
  for captures in DYNAMIC_IMPORT_RE.captures_iter(source) {
    dynamic_specifiers.insert(captures[1].to_string());
  }

  ScannedImports {
    static_specifiers: static_specifiers.into_iter().collect(),
    dynamic_specifiers: dynamic_specifiers.into_iter().collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::scan_imports;

  #[test]
  fn recognizes_all_static_forms() {
    let source = r#"
import React from 'react';
import { render } from "react-dom";
import './style.css';
export { Button } from './button';
const legacy = require('./legacy');
"#;
    let scanned = scan_imports(source);
    assert_eq!(
      scanned.static_specifiers,
      ["react", "react-dom", "./style.css", "./button", "./legacy"]
    );
    assert!(scanned.dynamic_specifiers.is_empty());
  }

  #[test]
  fn separates_dynamic_imports() {
    let source = "import App from './app';\nconst page = import('./pages/settings');";
    let scanned = scan_imports(source);
    assert_eq!(scanned.static_specifiers, ["./app"]);
    assert_eq!(scanned.dynamic_specifiers, ["./pages/settings"]);
  }

  #[test]
  fn dedupes_repeated_specifiers_preserving_order() {
    let source = "import a from './a';\nimport b from './b';\nimport { x } from './a';";
    let scanned = scan_imports(source);
    assert_eq!(scanned.static_specifiers, ["./a", "./b"]);
  }

  #[test]
  fn ignores_computed_specifiers() {
    let source = "const mod = import(prefix + '/dynamic');\nrequire(name);";
    let scanned = scan_imports(source);
    assert!(scanned.static_specifiers.is_empty());
    assert!(scanned.dynamic_specifiers.is_empty());
  }
}
