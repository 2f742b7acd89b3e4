use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A recoverable, file-scoped condition. The pipeline accumulates these and
/// carries on; only parse and chunk-table failures abort a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
  pub path: String,
  pub kind: WarningKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
  /// A computed assignment on the namespace root, e.g. `THREE[x] = y`.
  ComputedAssignment,
  /// A computed read of the namespace root, e.g. `THREE[x]`.
  ComputedAccess,
  /// The namespace root is still referenced after every property access was
  /// classified, e.g. the whole namespace object passed by reference.
  ResidualNamespaceReference { namespace: String },
  /// The file requires a name that no file provides.
  MissingDefinition { name: String },
  /// The file provides a name another file already provided; the later file
  /// wins.
  Redefinition { name: String, previous: String },
}

impl Display for Warning {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      WarningKind::ComputedAssignment => {
        write!(f, "ignored {} (computed assignment)", self.path)
      }
      WarningKind::ComputedAccess => {
        write!(f, "ignored {} (computed expression)", self.path)
      }
      WarningKind::ResidualNamespaceReference { namespace } => {
        write!(f, "ignored {} ({} is still referenced)", self.path, namespace)
      }
      WarningKind::MissingDefinition { name } => {
        write!(f, "ignored {} (missing {} definition)", self.path, name)
      }
      WarningKind::Redefinition { name, previous } => {
        write!(
          f,
          "redefinition of {} in {}, previously defined in {}",
          name, self.path, previous
        )
      }
    }
  }
}
