use crate::file::FileUnit;
use crate::warning::Warning;
use crate::warning::WarningKind;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;

/// Global mapping from provided name to its owning file's path. At most one
/// current owner per name; a later provider overwrites an earlier one.
pub struct DefinitionIndex {
  owners: HashMap<String, String>,
}

impl DefinitionIndex {
  pub fn new() -> DefinitionIndex {
    DefinitionIndex {
      owners: HashMap::new(),
    }
  }

  /// Registers `path` as the owner of `name`, returning the previous owner if
  /// one existed.
  pub fn insert(&mut self, name: &str, path: &str) -> Option<String> {
    self.owners.insert(name.to_string(), path.to_string())
  }

  pub fn owner(&self, name: &str) -> Option<&str> {
    self.owners.get(name).map(|p| p.as_str())
  }

  /// Removes every name owned by `path`, for when its file is dropped.
  pub fn remove_file(&mut self, path: &str) {
    self.owners.retain(|_, owner| owner != path);
  }
}

impl Default for DefinitionIndex {
  fn default() -> Self {
    Self::new()
  }
}

pub fn find_file<'a>(files: &'a [FileUnit], path: &str) -> Option<&'a FileUnit> {
  files.iter().find(|f| f.path == path)
}

/// The files `file` requires, as (path, names required from it) pairs in
/// first-required order.
pub fn required_files(file: &FileUnit, defs: &DefinitionIndex) -> Vec<(String, Vec<String>)> {
  let mut out: Vec<(String, Vec<String>)> = Vec::new();
  for name in &file.requires {
    let Some(owner) = defs.owner(name) else {
      continue;
    };
    match out.iter_mut().find(|(path, _)| path == owner) {
      Some((_, names)) => names.push(name.clone()),
      None => out.push((owner.to_string(), vec![name.clone()])),
    };
  }
  out
}

/// Whether `required_file` reaches back to `file` through its own requires,
/// transitively. Depth-first over the requires-name graph with a visited set
/// keyed by path, so cycles terminate.
pub fn has_deep_dependency(
  file: &FileUnit,
  required_file: &FileUnit,
  files: &[FileUnit],
  defs: &DefinitionIndex,
) -> bool {
  fn walk(
    target: &str,
    current: &FileUnit,
    files: &[FileUnit],
    defs: &DefinitionIndex,
    checked: &mut HashSet<String>,
  ) -> bool {
    if !checked.insert(current.path.clone()) {
      return false;
    };
    for name in &current.requires {
      let Some(owner) = defs.owner(name) else {
        continue;
      };
      if owner == target {
        return true;
      };
      let Some(inner) = find_file(files, owner) else {
        continue;
      };
      if walk(target, inner, files, defs, checked) {
        return true;
      };
    }
    false
  }

  let mut checked = HashSet::new();
  walk(&file.path, required_file, files, defs, &mut checked)
}

/// Drops every file with a require that no surviving file provides.
/// Dropping a file retracts its definitions, which may dangle other files'
/// requires, so this iterates to a fixpoint.
pub fn check_integrity(
  files: &mut Vec<FileUnit>,
  defs: &mut DefinitionIndex,
  warnings: &mut Vec<Warning>,
) {
  loop {
    let mut dangling = None;
    for (i, file) in files.iter().enumerate() {
      if let Some(name) = file.requires.iter().find(|name| defs.owner(name).is_none()) {
        dangling = Some((i, name.clone()));
        break;
      };
    }
    let Some((i, name)) = dangling else {
      break;
    };
    let file = files.remove(i);
    defs.remove_file(&file.path);
    warnings.push(Warning {
      path: file.path,
      kind: WarningKind::MissingDefinition { name },
    });
  }
}
