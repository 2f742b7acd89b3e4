use crate::file::FileUnit;
use crate::resolve::DefinitionIndex;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::Loc;

pub mod analyze;
pub mod chunks;
pub mod error;
pub mod file;
pub mod graph;
pub mod instance_of;
pub mod path;
pub mod resolve;
pub mod rewrite;
pub mod synth;
pub mod warning;

pub use error::ConvertError;
pub use graph::Graph;
pub use warning::Warning;
pub use warning::WarningKind;

/// Engine configuration.
pub struct CorpusOptions {
  /// The shared global namespace root identifier.
  pub namespace: String,
  /// Corpus-relative path of the chunk lookup-table file, if any.
  pub chunk_table: Option<String>,
}

impl Default for CorpusOptions {
  fn default() -> Self {
    CorpusOptions {
      namespace: "THREE".to_string(),
      chunk_table: None,
    }
  }
}

pub struct RewrittenModule {
  pub path: String,
  pub source: String,
}

/// The outcome of a successful run: one rewritten unit per surviving input
/// file, the aggregate entry point, the dependency graph, and every
/// file-scoped warning encountered along the way.
pub struct Conversion {
  pub modules: Vec<RewrittenModule>,
  pub index: String,
  pub graph: Graph,
  pub warnings: Vec<Warning>,
}

/// The whole body of input files, ingested up front and converted in one
/// pass.
pub struct Corpus {
  options: CorpusOptions,
  files: Vec<FileUnit>,
  chunks: Vec<(String, String)>,
  next_id: u32,
}

impl Corpus {
  pub fn new(options: CorpusOptions) -> Corpus {
    Corpus {
      options,
      files: Vec::new(),
      chunks: Vec::new(),
      next_id: 0,
    }
  }

  /// Parses and ingests one code file. A parse failure is fatal to the run.
  pub fn add_script(&mut self, path: &str, source: &str) -> Result<(), ConvertError> {
    let path = path::normalize(path);
    let top = syntax_js::parse(source).map_err(|error| ConvertError::Parse {
      path: path.clone(),
      error,
    })?;
    let names = analyze::collect_names(&top);
    let basename = path::stem(&path).to_string();
    self.files.push(FileUnit {
      id: self.next_id,
      path,
      basename,
      top,
      names,
      provides: Vec::new(),
      requires: Vec::new(),
    });
    self.next_id += 1;
    Ok(())
  }

  /// Ingests one raw-text chunk, keyed by its stem name.
  pub fn add_chunk(&mut self, name: &str, text: &str) {
    self.chunks.push((name.to_string(), text.to_string()));
  }

  /// Runs the pipeline: merge chunks, analyze every file, validate integrity,
  /// rewrite every survivor, derive the aggregate outputs.
  pub fn convert(mut self) -> Result<Conversion, ConvertError> {
    let mut warnings = Vec::new();

    if let Some(table) = &self.options.chunk_table {
      let table = path::normalize(table);
      chunks::merge_chunks(&mut self.files, &table, &self.chunks)?;
    };

    // Analysis must settle the definition index for every file before any
    // resolution or rewrite looks at it.
    let mut defs = DefinitionIndex::new();
    let mut files = Vec::new();
    for mut file in self.files {
      match analyze::analyze_file(&mut file, &self.options.namespace) {
        Ok(()) => {
          for provide in &file.provides {
            if let Some(previous) = defs.insert(&provide.name, &file.path) {
              warnings.push(Warning {
                path: file.path.clone(),
                kind: WarningKind::Redefinition {
                  name: provide.name.clone(),
                  previous,
                },
              });
            };
          }
          files.push(file);
        }
        Err(kind) => warnings.push(Warning {
          path: file.path,
          kind,
        }),
      };
    }

    resolve::check_integrity(&mut files, &mut defs, &mut warnings);

    // Import plans are computed against the frozen index before any file is
    // mutated; rewriting one file may then not observe another's rewrite.
    let import_plans: Vec<Vec<rewrite::ImportPlan>> = files
      .iter()
      .map(|file| {
        resolve::required_files(file, &defs)
          .into_iter()
          .filter_map(|(required_path, names)| {
            let required = resolve::find_file(&files, &required_path)?;
            Some(rewrite::ImportPlan {
              circular: resolve::has_deep_dependency(file, required, &files, &defs),
              path: required_path,
              names,
            })
          })
          .collect()
      })
      .collect();

    let mut forwarding = Vec::new();
    let mut modules = Vec::new();
    for (file, imports) in files.iter_mut().zip(import_plans) {
      rewrite::commonjsify(file, imports, &mut forwarding);
      modules.push(RewrittenModule {
        path: file.path.clone(),
        source: syntax_js::generate(&file.top),
      });
    }

    let graph = graph::build(&files, &defs);
    let index = syntax_js::generate(&Node::new(Loc(0, 0), TopLevel { body: forwarding }));

    Ok(Conversion {
      modules,
      index,
      graph,
      warnings,
    })
  }
}
