use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use syntax_js::error::SyntaxError;

/// A fatal failure: the whole run aborts, no partial output is produced.
#[derive(Debug)]
pub enum ConvertError {
  /// A source file failed to parse.
  Parse { path: String, error: SyntaxError },
  /// The chunk-table file does not open with an object-literal assignment.
  ChunkTable { path: String },
}

impl Display for ConvertError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ConvertError::Parse { path, error } => write!(f, "error parsing {}: {}", path, error),
      ConvertError::ChunkTable { path } => {
        write!(f, "chunk table {} is not an object-literal assignment", path)
      }
    }
  }
}

impl Error for ConvertError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      ConvertError::Parse { error, .. } => Some(error),
      ConvertError::ChunkTable { .. } => None,
    }
  }
}
