//! Contracts for the external tools the pipeline delegates to. The defaults
//! keep a build self-contained; real transpilers/minifiers plug in behind
//! these traits without the orchestrator knowing.

use std::sync::LazyLock;

use regex::Regex;

use crate::{MinifyOptions, ModuleId};

/// Converts modern syntax (jsx, newer ES) to target syntax. Syntax errors
/// surface as transform errors tagged with the module.
pub trait Transpiler: Send + Sync {
  fn transpile(&self, source: &str, module_id: &ModuleId) -> anyhow::Result<String>;
}

/// Compiles a style dialect (less) down to plain css.
pub trait StyleCompiler: Send + Sync {
  fn compile(&self, source: &str, module_id: &ModuleId) -> anyhow::Result<String>;
}

/// Minifies rendered chunk output.
pub trait Minifier: Send + Sync {
  fn minify(&self, source: &str, options: &MinifyOptions) -> anyhow::Result<String>;
}

/// Identity transpiler used when no real one is wired in.
pub struct IdentityTranspiler;

impl Transpiler for IdentityTranspiler {
  fn transpile(&self, source: &str, _module_id: &ModuleId) -> anyhow::Result<String> {
    Ok(source.to_string())
  }
}

/// Passes the dialect through unchanged.
pub struct PassthroughStyleCompiler;

impl StyleCompiler for PassthroughStyleCompiler {
  fn compile(&self, source: &str, _module_id: &ModuleId) -> anyhow::Result<String> {
    Ok(source.to_string())
  }
}

static CONSOLE_CALL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^\s*console\.\w+\s*\([^\n]*\)\s*;?\s*$").expect("static pattern"));
static DEBUGGER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^\s*debugger\s*;?\s*$").expect("static pattern"));
static BLANK_LINES_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern"));

/// Statement-level minifier covering the configured compress options. Not a
/// real compressor; whole-line matching keeps it safe on unparsed source.
pub struct BasicMinifier;

impl Minifier for BasicMinifier {
  fn minify(&self, source: &str, options: &MinifyOptions) -> anyhow::Result<String> {
    let mut output = source.to_string();
    if options.drop_console {
      output = CONSOLE_CALL_RE.replace_all(&output, "").into_owned();
    }
    if options.drop_debugger {
      output = DEBUGGER_RE.replace_all(&output, "").into_owned();
    }
    Ok(BLANK_LINES_RE.replace_all(&output, "\n\n").trim_end().to_string())
  }
}
