use fastpack_common::{AssetClass, ModuleId, ModuleRule};

/// Combined verdict over all rules matching one module id.
#[derive(Debug, Default)]
pub struct MatchedRules {
  /// Transform names from every matched rule, concatenated in rule
  /// declaration order.
  pub transforms: Vec<String>,
  /// First asset classification among matched rules wins.
  pub asset: Option<AssetClass>,
}

/// Pure and deterministic: evaluates the frozen rule list against module
/// ids, never against content, so the same id always yields the same chain.
pub struct RuleMatcher {
  rules: Vec<ModuleRule>,
}

impl RuleMatcher {
  pub fn new(rules: Vec<ModuleRule>) -> Self {
    Self { rules }
  }

  pub fn match_id(&self, id: &ModuleId) -> MatchedRules {
    let mut matched = MatchedRules::default();
    for rule in &self.rules {
      if !rule.matches(id) {
        continue;
      }
      matched.transforms.extend(rule.transforms.iter().cloned());
      if matched.asset.is_none() {
        matched.asset = rule.asset;
      }
    }
    matched
  }
}

#[cfg(test)]
mod tests {
  use fastpack_common::{AssetClass, ModuleId, ModuleRule, RuleCondition};

  use super::RuleMatcher;

  fn rule(test: &str, transforms: &[&str], asset: Option<AssetClass>) -> ModuleRule {
    ModuleRule {
      name: None,
      test: RuleCondition::regex(test).unwrap(),
      include: vec![],
      exclude: vec![],
      transforms: transforms.iter().map(|name| (*name).to_string()).collect(),
      asset,
      side_effects: false,
    }
  }

  #[test]
  fn concatenates_transforms_in_declaration_order() {
    let matcher = RuleMatcher::new(vec![
      rule(r"\.less$", &["less"], None),
      rule(r"\.(less|css)$", &["css", "css-extract"], None),
    ]);
    let matched = matcher.match_id(&ModuleId::new("/app/src/theme.less"));
    assert_eq!(matched.transforms, ["less", "css", "css-extract"]);

    let matched = matcher.match_id(&ModuleId::new("/app/src/app.css"));
    assert_eq!(matched.transforms, ["css", "css-extract"]);
  }

  #[test]
  fn same_id_always_yields_the_same_verdict() {
    let matcher = RuleMatcher::new(vec![
      rule(r"\.png$", &[], Some(AssetClass::Image)),
      rule(r"\.jsx?$", &["script"], None),
    ]);
    let id = ModuleId::new("/app/src/logo.png");
    let first = matcher.match_id(&id);
    let second = matcher.match_id(&id);
    assert_eq!(first.asset, Some(AssetClass::Image));
    assert_eq!(first.asset, second.asset);
    assert_eq!(first.transforms, second.transforms);
  }

  #[test]
  fn unmatched_module_gets_an_empty_chain() {
    let matcher = RuleMatcher::new(vec![rule(r"\.css$", &["css"], None)]);
    let matched = matcher.match_id(&ModuleId::new("/app/src/data.json"));
    assert!(matched.transforms.is_empty());
    assert!(matched.asset.is_none());
  }
}
