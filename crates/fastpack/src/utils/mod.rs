pub mod normalize_options;
pub mod resolve_id;
pub mod rule_matcher;
pub mod scan_imports;
