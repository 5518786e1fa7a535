use fastpack_common::OutputAsset;
use fastpack_plugin::{BuildContext, Plugin};

/// Emits an `index.html` referencing every initial chunk file: stylesheet
/// links and deferred scripts, in chunk order, injected before `</head>`.
pub struct HtmlPlugin;

impl HtmlPlugin {
  fn scaffold(title: &str) -> String {
    format!(
      "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>{title}</title>\n</head>\n<body>\n  <div id=\"root\"></div>\n</body>\n</html>\n"
    )
  }
}

impl Plugin for HtmlPlugin {
  fn name(&self) -> &'static str {
    "html"
  }

  fn after_emit(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
    let Some(html) = &ctx.options.html else {
      return Ok(());
    };
    let title = html.title.as_deref().unwrap_or("fastpack app");
    let template = match &html.template {
      Some(path) => {
        let path =
          if path.is_absolute() { path.clone() } else { ctx.options.cwd.join(path) };
        if ctx.fs.exists(&path) {
          ctx.fs.read_to_string(&path)?
        } else {
          Self::scaffold(title)
        }
      }
      None => Self::scaffold(title),
    };

    let public = &ctx.options.public_path;
    let mut tags = String::new();
    for file in &ctx.chunk_files {
      if !file.is_initial {
        continue;
      }
      if file.is_css {
        tags.push_str(&format!(
          "  <link rel=\"stylesheet\" href=\"{public}{}\">\n",
          file.filename
        ));
      } else {
        tags.push_str(&format!(
          "  <script defer src=\"{public}{}\"></script>\n",
          file.filename
        ));
      }
    }

    let content = if let Some(position) = template.find("</head>") {
      let mut injected = String::with_capacity(template.len() + tags.len());
      injected.push_str(&template[..position]);
      injected.push_str(&tags);
      injected.push_str(&template[position..]);
      injected
    } else {
      format!("{template}{tags}")
    };

    ctx.assets.push(OutputAsset { filename: "index.html".to_string(), content: content.into_bytes() });
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use fastpack_common::{BundlerOptions, ChunkFileInfo, HtmlOptions};
  use fastpack_fs::MemoryFileSystem;
  use fastpack_plugin::{BuildContext, Plugin};

  use super::HtmlPlugin;
  use crate::{transforms::TransformRegistry, utils::normalize_options::normalize_options};

  fn chunk_file(name: &str, filename: &str, is_initial: bool, is_css: bool) -> ChunkFileInfo {
    ChunkFileInfo { chunk_name: ArcStr::from(name), filename: filename.to_string(), is_initial, is_css }
  }

  #[test]
  fn injects_initial_chunks_in_order() {
    let raw = BundlerOptions {
      cwd: Some("/app".into()),
      input: Some(vec!["./src/index.jsx".into()]),
      html: Some(HtmlOptions { template: None, title: Some("demo".to_string()) }),
      ..Default::default()
    };
    let options = normalize_options(raw, &TransformRegistry::with_builtins()).unwrap();
    let fs = MemoryFileSystem::default();
    let mut ctx = BuildContext::new(&options, &fs);
    ctx.chunk_files = vec![
      chunk_file("vendors", "vendors.abc.js", true, false),
      chunk_file("main", "main.def.js", true, false),
      chunk_file("main", "main.def.css", true, true),
      chunk_file("settings", "settings.123.js", false, false),
    ];

    HtmlPlugin.after_emit(&mut ctx).unwrap();

    let html = String::from_utf8(ctx.assets.pop().unwrap().content).unwrap();
    assert!(html.contains("<title>demo</title>"), "{html}");
    let vendors = html.find("vendors.abc.js").unwrap();
    let main = html.find("main.def.js").unwrap();
    assert!(vendors < main, "shared chunks load before entries");
    assert!(html.contains(r#"<link rel="stylesheet" href="/main.def.css">"#), "{html}");
    assert!(!html.contains("settings.123.js"), "async chunks are not preloaded");
  }

  #[test]
  fn uses_an_existing_template_file() {
    let raw = BundlerOptions {
      cwd: Some("/app".into()),
      input: Some(vec!["./src/index.jsx".into()]),
      html: Some(HtmlOptions { template: Some("public/index.html".into()), title: None }),
      ..Default::default()
    };
    let options = normalize_options(raw, &TransformRegistry::with_builtins()).unwrap();
    let fs = MemoryFileSystem::new([(
      "/app/public/index.html",
      "<html><head><!-- app --></head><body></body></html>",
    )]);
    let mut ctx = BuildContext::new(&options, &fs);
    ctx.chunk_files = vec![chunk_file("main", "main.def.js", true, false)];

    HtmlPlugin.after_emit(&mut ctx).unwrap();

    let html = String::from_utf8(ctx.assets.pop().unwrap().content).unwrap();
    assert!(html.contains("<!-- app -->"), "{html}");
    assert!(html.contains("main.def.js"), "{html}");
  }
}
