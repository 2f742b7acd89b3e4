use ahash::HashSet;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;

/// Placeholder identifier substituted for the namespace root at classified
/// occurrence sites. Contains a NUL so it cannot collide with or be shadowed
/// by any identifier in user code; every occurrence is replaced during
/// rewrite and none may survive to output.
pub const MARK: &str = "\u{0}ns";

/// The syntactic kind of a provide's defining expression. Function, object
/// and array expressions are safe to hoist into a local binding; literals are
/// exported in place; anything else is ambiguous and gets the guarded
/// type-tag treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProvideKind {
  Func,
  Obj,
  Arr,
  Lit,
  Other,
}

impl ProvideKind {
  pub fn safe_to_bind(self) -> bool {
    matches!(self, ProvideKind::Func | ProvideKind::Obj | ProvideKind::Arr)
  }
}

#[derive(Clone, Debug)]
pub struct Provide {
  pub name: String,
  pub kind: ProvideKind,
}

/// One input module: its parsed tree plus everything the analyzer learns
/// about it. Provides and requires keep insertion order, which downstream
/// phases observe.
pub struct FileUnit {
  pub id: u32,
  pub path: String,
  pub basename: String,
  pub top: Node<TopLevel>,
  /// Every identifier declared or referenced in the file, for collision-free
  /// renaming.
  pub names: HashSet<String>,
  pub provides: Vec<Provide>,
  pub requires: Vec<String>,
}

impl FileUnit {
  pub fn provides_name(&self, name: &str) -> bool {
    self.provides.iter().any(|p| p.name == name)
  }
}

/// Returns `base`, prefixed with as many underscores as needed to avoid every
/// name already in `names`, and reserves the result.
pub fn unique_name(names: &mut HashSet<String>, base: &str) -> String {
  let mut name = base.to_string();
  while names.contains(&name) {
    name.insert(0, '_');
  }
  names.insert(name.clone());
  name
}

#[cfg(test)]
mod tests {
  use super::*;
  use ahash::HashSetExt;

  #[test]
  fn unique_name_prepends_underscores() {
    let mut names = HashSet::new();
    names.insert("instance".to_string());
    names.insert("_instance".to_string());
    assert_eq!(unique_name(&mut names, "instance"), "__instance");
    // The result is reserved too.
    assert_eq!(unique_name(&mut names, "instance"), "___instance");
  }
}
