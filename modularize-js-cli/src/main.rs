use clap::Parser;
use modularize_js::Conversion;
use modularize_js::Corpus;
use modularize_js::CorpusOptions;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
  name = "modularize-js",
  about = "Converts a shared-global-namespace JS tree into CommonJS modules"
)]
struct Cli {
  /// Directory containing the source tree to convert.
  #[arg(short, long)]
  input: PathBuf,

  /// Directory to write the converted modules into.
  #[arg(short, long)]
  output: PathBuf,

  /// Destination for the dependency graph JSON; omit to skip it.
  #[arg(short, long)]
  graph: Option<PathBuf>,

  /// Namespace root identifier to eliminate.
  #[arg(long, default_value = "THREE")]
  namespace: String,

  /// Corpus-relative path of the file whose object-literal provide receives
  /// the shader chunks.
  #[arg(long)]
  chunk_table: Option<String>,

  /// Directory holding the package.json and README.md templates to copy into
  /// the output.
  #[arg(long, default_value = "./dist")]
  dist: PathBuf,
}

fn fail(message: String) -> ! {
  eprintln!("{}", message);
  process::exit(1);
}

/// Every file under `dir`, depth first, in lexicographic order per directory
/// so runs are deterministic across platforms.
fn walk_sorted(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
  let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
  entries.sort_by_key(|entry| entry.file_name());
  for entry in entries {
    let path = entry.path();
    if entry.file_type()?.is_dir() {
      walk_sorted(&path, out)?;
    } else {
      out.push(path);
    }
  }
  Ok(())
}

fn read_source(path: &Path) -> String {
  match fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => fail(format!("failed to read {}: {}", path.display(), err)),
  }
}

fn write_artifact(path: &Path, contents: &str) {
  if let Some(parent) = path.parent() {
    if let Err(err) = fs::create_dir_all(parent) {
      fail(format!("failed to create {}: {}", parent.display(), err));
    };
  };
  if let Err(err) = fs::write(path, contents) {
    fail(format!("failed to write {}: {}", path.display(), err));
  };
  eprintln!("written {}", path.display());
}

fn ingest(corpus: &mut Corpus, input: &Path) {
  let mut paths = Vec::new();
  if let Err(err) = walk_sorted(input, &mut paths) {
    fail(format!("failed to read {}: {}", input.display(), err));
  };
  for path in paths {
    let Ok(relative) = path.strip_prefix(input) else {
      continue;
    };
    match path.extension().and_then(|e| e.to_str()) {
      Some("js") => {
        let relative = relative.to_string_lossy().replace('\\', "/");
        let source = read_source(&path);
        if let Err(err) = corpus.add_script(&relative, &source) {
          fail(err.to_string());
        };
      }
      Some("glsl") => {
        let name = match path.file_stem() {
          Some(stem) => stem.to_string_lossy().into_owned(),
          None => continue,
        };
        corpus.add_chunk(&name, &read_source(&path));
      }
      _ => {}
    };
  }
}

fn write_outputs(conversion: &Conversion, args: &Cli) {
  for module in &conversion.modules {
    let relative = module.path.trim_start_matches("./");
    write_artifact(&args.output.join(relative), &module.source);
  }
  write_artifact(&args.output.join("index.js"), &conversion.index);

  for template in ["package.json", "README.md"] {
    let source = args.dist.join(template);
    if source.is_file() {
      write_artifact(&args.output.join(template), &read_source(&source));
    };
  }

  if let Some(graph_path) = &args.graph {
    write_artifact(graph_path, &conversion.graph.to_json());
  };
}

fn main() {
  let args = Cli::parse();

  let mut corpus = Corpus::new(CorpusOptions {
    namespace: args.namespace.clone(),
    chunk_table: args.chunk_table.clone(),
  });
  ingest(&mut corpus, &args.input);

  let conversion = match corpus.convert() {
    Ok(conversion) => conversion,
    Err(err) => fail(err.to_string()),
  };
  for warning in &conversion.warnings {
    eprintln!("{}", warning);
  }
  write_outputs(&conversion, &args);
}
