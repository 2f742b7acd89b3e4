use crate::file::FileUnit;
use crate::path;
use crate::resolve;
use crate::resolve::DefinitionIndex;
use serde::Serialize;

/// Node/edge view over the surviving file graph, for visualization. Purely
/// observational.
#[derive(Debug, Serialize)]
pub struct Graph {
  pub nodes: Vec<GraphNode>,
  pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Serialize)]
pub struct GraphNode {
  pub id: u32,
  pub label: String,
  pub group: String,
  /// How many other surviving files require this one.
  pub value: u32,
}

#[derive(Debug, Serialize)]
pub struct GraphEdge {
  pub from: u32,
  pub to: u32,
}

pub fn build(files: &[FileUnit], defs: &DefinitionIndex) -> Graph {
  let mut nodes: Vec<GraphNode> = files
    .iter()
    .map(|file| GraphNode {
      id: file.id,
      label: file.basename.clone(),
      group: path::group(&file.path),
      value: 0,
    })
    .collect();

  let mut edges = Vec::new();
  for file in files {
    for (required_path, _) in resolve::required_files(file, defs) {
      let Some(required) = resolve::find_file(files, &required_path) else {
        continue;
      };
      edges.push(GraphEdge {
        from: file.id,
        to: required.id,
      });
      if let Some(node) = nodes.iter_mut().find(|n| n.id == required.id) {
        node.value += 1;
      };
    }
  }

  Graph { nodes, edges }
}

impl Graph {
  pub fn to_json(&self) -> String {
    // Schema is plain data; serialization cannot fail.
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}
