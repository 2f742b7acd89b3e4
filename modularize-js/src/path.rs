/// Path handling for corpus-relative module paths. All paths are normalized
/// to the `./a/b/C.js` form with forward slashes before anything else looks
/// at them.
pub fn normalize(path: &str) -> String {
  let path = path.replace('\\', "/");
  let trimmed = path.trim_start_matches("./");
  format!("./{}", trimmed)
}

/// Basename without the extension, e.g. `./math/Color.js` -> `Color`.
pub fn stem(path: &str) -> &str {
  let base = path.rsplit('/').next().unwrap_or(path);
  match base.rfind('.') {
    Some(i) if i > 0 => &base[..i],
    _ => base,
  }
}

pub fn extension(path: &str) -> Option<&str> {
  let base = path.rsplit('/').next().unwrap_or(path);
  match base.rfind('.') {
    Some(i) if i > 0 => Some(&base[i + 1..]),
    _ => None,
  }
}

/// The containing directory as a display group: leading `./` and trailing
/// slash trimmed, so `./math/Color.js` -> `math` and `./Three.js` -> ``.
pub fn group(path: &str) -> String {
  let dir = match path.rfind('/') {
    Some(i) => &path[..i],
    None => "",
  };
  dir.trim_start_matches("./").trim_start_matches('.').to_string()
}

fn dir_components(path: &str) -> Vec<&str> {
  let dir = match path.rfind('/') {
    Some(i) => &path[..i],
    None => "",
  };
  dir
    .split('/')
    .filter(|c| !c.is_empty() && *c != ".")
    .collect()
}

/// The require path of `to` relative to the file `from`, with the `.js`
/// extension dropped: `./Vector3` for siblings, `../core/Object3D` across
/// directories.
pub fn relative_module(from: &str, to: &str) -> String {
  let to = to.strip_suffix(".js").unwrap_or(to);
  let from_dirs = dir_components(from);
  let to_dirs = dir_components(to);
  let to_base = to.rsplit('/').next().unwrap_or(to);

  let common = from_dirs
    .iter()
    .zip(to_dirs.iter())
    .take_while(|(a, b)| a == b)
    .count();

  let mut out = String::new();
  for _ in common..from_dirs.len() {
    out.push_str("../");
  }
  if out.is_empty() {
    out.push_str("./");
  }
  for dir in &to_dirs[common..] {
    out.push_str(dir);
    out.push('/');
  }
  out.push_str(to_base);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_prefixes() {
    assert_eq!(normalize("math/Color.js"), "./math/Color.js");
    assert_eq!(normalize("./math/Color.js"), "./math/Color.js");
  }

  #[test]
  fn extracts_stems_and_groups() {
    assert_eq!(stem("./math/Color.js"), "Color");
    assert_eq!(stem("./Three.js"), "Three");
    assert_eq!(group("./math/Color.js"), "math");
    assert_eq!(group("./Three.js"), "");
    assert_eq!(group("./renderers/shaders/ShaderChunk.js"), "renderers/shaders");
  }

  #[test]
  fn computes_relative_require_paths() {
    assert_eq!(
      relative_module("./math/Color.js", "./math/Vector3.js"),
      "./Vector3"
    );
    assert_eq!(
      relative_module("./math/Color.js", "./core/Object3D.js"),
      "../core/Object3D"
    );
    assert_eq!(relative_module("./Three.js", "./math/Color.js"), "./math/Color");
    assert_eq!(relative_module("./math/Color.js", "./Three.js"), "../Three");
  }
}
