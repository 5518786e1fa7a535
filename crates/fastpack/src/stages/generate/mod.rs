use std::{path::Path, sync::LazyLock};

use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashSet;

use fastpack_common::{
  AssetClass, Chunk, ChunkFileInfo, ChunkIdx, Emission, Module, ModuleKind,
  NormalizedBundlerOptions, OutputAsset,
};
use fastpack_error::BuildResult;
use fastpack_utils::{
  data_url::to_data_url, sanitize_file_name::sanitize_file_name, xxhash::xxhash_short,
};

use crate::{graph::ChunkGraph, types::Collaborators};

static TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_-]*").expect("static pattern"));

#[derive(Debug, Default)]
pub struct GenerateOutput {
  pub assets: Vec<OutputAsset>,
  pub chunk_files: Vec<ChunkFileInfo>,
  pub used_tokens: FxHashSet<String>,
}

struct RenderedChunk {
  js: String,
  css: Option<String>,
  asset_files: Vec<OutputAsset>,
  used_tokens: FxHashSet<String>,
}

/// Renders every chunk to its final file contents. Chunks are independent,
/// so rendering fans out over rayon; filename assignment stays sequential in
/// chunk order to keep the output deterministic.
pub struct GenerateStage<'a> {
  options: &'a NormalizedBundlerOptions,
  modules: &'a fastpack_common::ModuleTable,
  graph: &'a mut ChunkGraph,
  collaborators: &'a Collaborators,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    options: &'a NormalizedBundlerOptions,
    modules: &'a fastpack_common::ModuleTable,
    graph: &'a mut ChunkGraph,
    collaborators: &'a Collaborators,
  ) -> Self {
    Self { options, modules, graph, collaborators }
  }

  pub fn generate(self) -> BuildResult<GenerateOutput> {
    let rendered: Vec<(ChunkIdx, RenderedChunk)> = {
      let graph = &*self.graph;
      graph
        .sorted_chunk_idx_vec
        .par_iter()
        .map(|&chunk_idx| {
          render_chunk(self.options, self.modules, &graph.chunk_table[chunk_idx], self.collaborators)
            .map(|chunk| (chunk_idx, chunk))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(fastpack_error::BuildError::from)?
    };

    let mut output = GenerateOutput::default();
    for (chunk_idx, rendered) in rendered {
      let chunk = &mut self.graph.chunk_table[chunk_idx];

      // Chunk names can come straight from user config; they are not
      // trusted to be valid path components.
      let safe_name = sanitize_file_name(&chunk.name);
      let js_hash = xxhash_short(rendered.js.as_bytes(), 16);
      let filename =
        self.options.entry_filenames.render(&safe_name, ".js", Some(&js_hash));
      chunk.filename = Some(filename.clone());
      output.chunk_files.push(ChunkFileInfo {
        chunk_name: chunk.name.clone(),
        filename: filename.clone(),
        is_initial: chunk.is_initial,
        is_css: false,
      });
      output.assets.push(OutputAsset { filename, content: rendered.js.into_bytes() });

      if let Some(css) = rendered.css {
        let css_hash = xxhash_short(css.as_bytes(), 16);
        let css_filename =
          self.options.css_filenames.render(&safe_name, ".css", Some(&css_hash));
        chunk.css_filename = Some(css_filename.clone());
        output.chunk_files.push(ChunkFileInfo {
          chunk_name: chunk.name.clone(),
          filename: css_filename.clone(),
          is_initial: chunk.is_initial,
          is_css: true,
        });
        output.assets.push(OutputAsset { filename: css_filename, content: css.into_bytes() });
      }

      output.assets.extend(rendered.asset_files);
      output.used_tokens.extend(rendered.used_tokens);
    }
    Ok(output)
  }
}

fn render_chunk(
  options: &NormalizedBundlerOptions,
  modules: &fastpack_common::ModuleTable,
  chunk: &Chunk,
  collaborators: &Collaborators,
) -> anyhow::Result<RenderedChunk> {
  let mut js = format!("/* fastpack chunk: {} */\n", chunk.name);
  let mut css_parts: Vec<String> = Vec::new();
  let mut asset_files: Vec<OutputAsset> = Vec::new();
  let mut used_tokens: FxHashSet<String> = FxHashSet::default();

  for &module_idx in &chunk.modules {
    let module = &modules[module_idx];
    let stable = module.id.stabilize(&options.cwd);
    match module.kind {
      ModuleKind::Normal => {
        js.push_str(&format!("\n// {stable}\n"));
        js.push_str(&module.transformed);
        js.push('\n');
        for token in TOKEN_RE.find_iter(&module.transformed) {
          used_tokens.insert(token.as_str().to_string());
        }
      }
      ModuleKind::Stylesheet => {
        css_parts.push(format!("/* {stable} */\n{}\n", module.transformed));
      }
      ModuleKind::Asset(class) => {
        let reference = render_asset(options, module, class, &mut asset_files);
        js.push_str(&format!("\n// {stable}\nmodule.exports = \"{reference}\";\n"));
      }
    }
  }

  if let Some(minify) = &options.minify {
    js = collaborators.minifier.minify(&js, minify)?;
  }

  let css = if css_parts.is_empty() { None } else { Some(css_parts.concat()) };
  Ok(RenderedChunk { js, css, asset_files, used_tokens })
}

/// Applies the inline-or-emit policy for one asset module and returns the
/// string the importing code receives.
fn render_asset(
  options: &NormalizedBundlerOptions,
  module: &Module,
  class: AssetClass,
  asset_files: &mut Vec<OutputAsset>,
) -> String {
  let class_options = options.asset.class(class);
  let bytes = module.source.as_bytes();
  let path = Path::new(module.id.as_ref());
  match class_options.decide(module.source.byte_len()) {
    Emission::Inline => to_data_url(path, bytes),
    Emission::Emit => {
      let ext = module.id.extension().map_or_else(String::new, |ext| format!(".{ext}"));
      let hash = xxhash_short(bytes, 32);
      let filename = fastpack_common::FilenameTemplate::new(class_options.filename.as_str())
        .render(&sanitize_file_name(module.id.file_stem()), &ext, Some(&hash));
      asset_files.push(OutputAsset { filename: filename.clone(), content: bytes.to_vec() });
      format!("{}{filename}", options.public_path)
    }
  }
}
