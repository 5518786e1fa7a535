use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InputArgs {
  /// JSON configuration file; command-line flags override its values.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub input: Option<Vec<PathBuf>>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long)]
  pub public_path: Option<String>,

  #[clap(long)]
  pub entry_filenames: Option<String>,

  #[clap(long)]
  pub css_filenames: Option<String>,
}

/// Dev-server settings. Serving is handled by an external collaborator;
/// these values are validated and forwarded through the options.
#[derive(Args)]
pub struct ServeArgs {
  #[clap(long)]
  pub host: Option<String>,

  #[clap(long, short = 'p')]
  pub port: Option<u16>,

  /// Enable module hot replacement.
  #[clap(long)]
  pub hot: bool,

  /// Directory served to the outside; defaults to the output dir.
  #[clap(long)]
  pub static_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  #[clap(long, short = 'm')]
  pub minify: bool,

  /// Empty the output directory before writing.
  #[clap(long)]
  pub clean: bool,

  /// Emit an index.html referencing the initial chunks.
  #[clap(long)]
  pub html: bool,

  /// Strip css rules whose selectors never appear in script sources.
  #[clap(long)]
  pub purge_css: bool,

  /// Reuse transform results from the persistent cache.
  #[clap(long)]
  pub cache: bool,

  #[clap(long, short = 's')]
  pub silent: bool,
}
