mod args;

use std::{path::Path, time::Instant};

use ansi_term::Colour;
use args::{EnhanceArgs, InputArgs, OutputArgs, ServeArgs};
use clap::Parser;

use fastpack::{
  Bundler, BundlerOptions, HtmlOptions, MinifyOptions, OutputAsset,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  serve: ServeArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn load_config(path: &Path) -> anyhow::Result<BundlerOptions> {
  let text = std::fs::read_to_string(path)?;
  Ok(serde_json::from_str(&text)?)
}

fn apply_flags(options: &mut BundlerOptions, args: Commands) {
  let InputArgs { cwd, input, .. } = args.input;
  if cwd.is_some() {
    options.cwd = cwd;
  }
  if let Some(input) = input {
    options.input = Some(input.iter().map(|path| path.to_string_lossy().into()).collect());
  }

  let OutputArgs { dir, public_path, entry_filenames, css_filenames } = args.output;
  if dir.is_some() {
    options.dir = dir;
  }
  if public_path.is_some() {
    options.public_path = public_path;
  }
  if entry_filenames.is_some() {
    options.entry_filenames = entry_filenames;
  }
  if css_filenames.is_some() {
    options.css_filenames = css_filenames;
  }

  let ServeArgs { host, port, hot, static_dir } = args.serve;
  if host.is_some() || port.is_some() || hot || static_dir.is_some() {
    let mut dev_server = options.dev_server.take().unwrap_or_default();
    if let Some(host) = host {
      dev_server.host = host;
    }
    if let Some(port) = port {
      dev_server.port = port;
    }
    if hot {
      dev_server.hot = true;
    }
    if static_dir.is_some() {
      dev_server.static_dir = static_dir;
    }
    options.dev_server = Some(dev_server);
  }

  if args.enhance.minify {
    let mut optimization = options.optimization.take().unwrap_or_default();
    optimization.minify = Some(MinifyOptions { drop_console: true, drop_debugger: true });
    options.optimization = Some(optimization);
  }
  if args.enhance.clean {
    options.clean = Some(true);
  }
  if args.enhance.html && options.html.is_none() {
    options.html = Some(HtmlOptions::default());
  }
  if args.enhance.purge_css {
    options.purge_css = Some(true);
  }
  if args.enhance.cache {
    let mut cache = options.cache.take().unwrap_or_default();
    cache.enabled = Some(true);
    options.cache = Some(cache);
  }
}

fn print_output_assets(outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len()
    }

    let is_chunk = output.filename.ends_with(".js") || output.filename.ends_with(".css");
    assets.push((output.filename, size, is_chunk));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, is_chunk) in assets {
    let asset_type = if is_chunk { "chunk" } else { "asset" };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename),
      "",
      dim.paint(asset_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    )
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();
  let silent = args.enhance.silent;

  let mut options = match &args.input.config {
    Some(path) => match load_config(path) {
      Ok(options) => options,
      Err(error) => {
        println!("{} {error}", Colour::Red.paint("Error:"));
        std::process::exit(1);
      }
    },
    None => BundlerOptions::default(),
  };
  apply_flags(&mut options, args);

  let mut bundler = match Bundler::new(options) {
    Ok(bundler) => bundler,
    Err(errors) => {
      for error in &*errors {
        println!("{} {error}", Colour::Red.paint("Error:"));
      }
      std::process::exit(1);
    }
  };

  let start = Instant::now();
  match bundler.write().await {
    Ok(output) => {
      if !silent {
        // Print warnings
        for warning in output.warnings {
          println!("{} {warning}", Colour::Yellow.paint("Warning:"));
        }

        // Print output assets
        if !output.assets.is_empty() {
          print_output_assets(output.assets);
        }
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed))
    }
    Err(errors) => {
      for error in &*errors {
        println!("{} {error}", Colour::Red.paint("Error:"));
      }
      std::process::exit(1);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dev_server_flags_overlay_config_values() {
    let args =
      Commands::parse_from(["fastpack", "--host", "0.0.0.0", "--port", "3000", "--hot"]);
    let mut options = BundlerOptions::default();
    apply_flags(&mut options, args);

    let dev_server = options.dev_server.unwrap();
    assert_eq!(dev_server.host, "0.0.0.0");
    assert_eq!(dev_server.port, 3000);
    assert!(dev_server.hot);
    assert!(dev_server.static_dir.is_none());
  }

  #[test]
  fn absent_dev_server_flags_leave_options_untouched() {
    let args = Commands::parse_from(["fastpack", "--minify"]);
    let mut options = BundlerOptions::default();
    apply_flags(&mut options, args);
    assert!(options.dev_server.is_none());
  }
}
