use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use fastpack_plugin::{BuildContext, Plugin};

static SELECTOR_TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[.#]([A-Za-z_][A-Za-z0-9_-]*)").expect("static pattern"));

/// Drops css rules whose class/id selectors never appear as tokens in any
/// script source. Element selectors and at-rules are always kept; this
/// prunes conservatively rather than parsing css for real.
pub struct PurgeCssPlugin;

impl Plugin for PurgeCssPlugin {
  fn name(&self) -> &'static str {
    "purge-css"
  }

  fn after_emit(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
    let css_files: FxHashSet<String> = ctx
      .chunk_files
      .iter()
      .filter(|file| file.is_css)
      .map(|file| file.filename.clone())
      .collect();
    for asset in &mut ctx.assets {
      if css_files.contains(&asset.filename) {
        let css = String::from_utf8_lossy(&asset.content);
        let pruned = prune_css(&css, &ctx.used_tokens);
        tracing::debug!(
          file = asset.filename,
          before = css.len(),
          after = pruned.len(),
          "pruned unused css"
        );
        asset.content = pruned.into_bytes();
      }
    }
    Ok(())
  }
}

/// Keeps a rule when any of its selectors is an element selector or names a
/// token seen in script sources. At-rule blocks survive wholesale.
fn prune_css(css: &str, used_tokens: &FxHashSet<String>) -> String {
  let mut output = String::with_capacity(css.len());
  let mut rest = css;
  loop {
    let Some(open) = rest.find('{') else {
      output.push_str(rest);
      break;
    };
    let selector = &rest[..open];
    let Some(close) = matching_close(rest, open) else {
      output.push_str(rest);
      break;
    };
    let block = &rest[..=close];
    if selector_is_used(selector, used_tokens) {
      output.push_str(block);
    }
    rest = &rest[close + 1..];
  }
  output
}

fn matching_close(text: &str, open: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (offset, ch) in text[open..].char_indices() {
    match ch {
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth == 0 {
          return Some(open + offset);
        }
      }
      _ => {}
    }
  }
  None
}

fn selector_is_used(selector: &str, used_tokens: &FxHashSet<String>) -> bool {
  if selector.trim_start().starts_with('@') {
    return true;
  }
  selector.split(',').any(|part| {
    let mut tokens = SELECTOR_TOKEN_RE.captures_iter(part).peekable();
    if tokens.peek().is_none() {
      // Pure element/universal selector; nothing to match against.
      return true;
    }
    tokens.any(|captures| used_tokens.contains(&captures[1]))
  })
}

#[cfg(test)]
mod tests {
  use rustc_hash::FxHashSet;

  use super::prune_css;

  fn used(tokens: &[&str]) -> FxHashSet<String> {
    tokens.iter().map(|token| (*token).to_string()).collect()
  }

  #[test]
  fn drops_rules_with_unseen_class_selectors() {
    let css = ".app { color: red; }\n.unused { color: blue; }\nbody { margin: 0; }";
    let pruned = prune_css(css, &used(&["app"]));
    assert!(pruned.contains(".app"));
    assert!(!pruned.contains(".unused"));
    assert!(pruned.contains("body"));
  }

  #[test]
  fn keeps_at_rules_wholesale() {
    let css = "@media (max-width: 600px) { .unused { display: none; } }";
    let pruned = prune_css(css, &used(&[]));
    assert_eq!(pruned, css);
  }

  #[test]
  fn any_used_selector_in_a_group_keeps_the_rule() {
    let css = ".gone, .app { color: red; }";
    let pruned = prune_css(css, &used(&["app"]));
    assert!(pruned.contains(".gone, .app"));
  }
}
