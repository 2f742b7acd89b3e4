use crate::file::FileUnit;
use crate::file::Provide;
use crate::file::ProvideKind;
use crate::file::MARK;
use crate::instance_of;
use crate::synth;
use crate::warning::WarningKind;
use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::pat::IdPat;
use syntax_js::ast::stx::TopLevel;
use syntax_js::operator::OperatorName;

type ExprNode = Node<Expr>;
type IdPatNode = Node<IdPat>;

/// Collects every identifier declared or referenced in the tree. Property
/// names do not count; they live in their own namespace.
pub fn collect_names(top: &Node<TopLevel>) -> HashSet<String> {
  #[derive(Visitor)]
  #[visitor(ExprNode(enter), IdPatNode(enter))]
  struct NameCollector {
    names: HashSet<String>,
  }

  impl NameCollector {
    fn enter_expr_node(&mut self, node: &ExprNode) {
      if let Expr::Id(id) = node.stx.as_ref() {
        self.names.insert(id.stx.name.clone());
      };
    }

    fn enter_id_pat_node(&mut self, node: &IdPatNode) {
      self.names.insert(node.stx.name.clone());
    }
  }

  let mut collector = NameCollector {
    names: HashSet::new(),
  };
  top.drive(&mut collector);
  collector.names
}

fn is_root_id(expr: &Expr, namespace: &str) -> bool {
  matches!(expr, Expr::Id(id) if id.stx.name == namespace)
}

fn classify_kind(expr: &Expr) -> ProvideKind {
  match expr {
    Expr::Func(_) => ProvideKind::Func,
    Expr::LitObj(_) => ProvideKind::Obj,
    Expr::LitArr(_) => ProvideKind::Arr,
    Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitRegex(_)
    | Expr::LitStr(_) => ProvideKind::Lit,
    _ => ProvideKind::Other,
  }
}

/// Finds every plain assignment to a property of the namespace root, at any
/// depth. A computed assignment on the root invalidates the file.
#[derive(Visitor)]
#[visitor(ExprNode(enter))]
struct ProvideScanner {
  namespace: String,
  provides: Vec<Provide>,
  invalid: bool,
}

impl ProvideScanner {
  fn enter_expr_node(&mut self, node: &ExprNode) {
    if self.invalid {
      return;
    };
    let Expr::Binary(assignment) = node.stx.as_ref() else {
      return;
    };
    if assignment.stx.operator != OperatorName::Assignment {
      return;
    };
    match assignment.stx.left.stx.as_ref() {
      Expr::Member(m) if is_root_id(&m.stx.object.stx, &self.namespace) => {
        let name = m.stx.member.clone();
        let kind = classify_kind(&assignment.stx.right.stx);
        match self.provides.iter_mut().find(|p| p.name == name) {
          // A later assignment to the same name keeps the first position but
          // decides the kind.
          Some(p) => p.kind = kind,
          None => self.provides.push(Provide { name, kind }),
        };
      }
      Expr::ComputedMember(m) if is_root_id(&m.stx.object.stx, &self.namespace) => {
        self.invalid = true;
      }
      _ => {}
    };
  }
}

/// Substitutes the placeholder for the root at every non-computed property
/// access, recording requires as it goes. A computed read of the root
/// invalidates the file.
#[derive(VisitorMut)]
#[visitor(ExprNode(exit))]
struct OccurrenceMarker {
  namespace: String,
  provided: HashSet<String>,
  requires: Vec<String>,
  invalid: bool,
}

impl OccurrenceMarker {
  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    if self.invalid {
      return;
    };
    match node.stx.as_mut() {
      Expr::Member(m) => {
        if !is_root_id(&m.stx.object.stx, &self.namespace) {
          return;
        };
        let name = &m.stx.member;
        if !self.provided.contains(name) && !self.requires.iter().any(|r| r == name) {
          self.requires.push(name.clone());
        };
        m.stx.object = synth::id(MARK);
      }
      Expr::ComputedMember(m) => {
        if is_root_id(&m.stx.object.stx, &self.namespace) {
          self.invalid = true;
        };
      }
      _ => {}
    };
  }
}

/// Whether any identifier reference or declaration of the root remains.
fn references_namespace(top: &Node<TopLevel>, namespace: &str) -> bool {
  #[derive(Visitor)]
  #[visitor(ExprNode(enter), IdPatNode(enter))]
  struct ResidualScanner {
    namespace: String,
    found: bool,
  }

  impl ResidualScanner {
    fn enter_expr_node(&mut self, node: &ExprNode) {
      if is_root_id(&node.stx, &self.namespace) {
        self.found = true;
      };
    }

    fn enter_id_pat_node(&mut self, node: &IdPatNode) {
      if node.stx.name == self.namespace {
        self.found = true;
      };
    }
  }

  let mut scanner = ResidualScanner {
    namespace: namespace.to_string(),
    found: false,
  };
  top.drive(&mut scanner);
  scanner.found
}

/// Classifies every namespace-root access in the file. On success the file's
/// provides and requires are populated and every occurrence site carries the
/// placeholder. On failure the file must be dropped; its tree is partially
/// marked and no longer usable.
pub fn analyze_file(file: &mut FileUnit, namespace: &str) -> Result<(), WarningKind> {
  instance_of::rewrite_instance_of(file, namespace);

  let mut scanner = ProvideScanner {
    namespace: namespace.to_string(),
    provides: Vec::new(),
    invalid: false,
  };
  file.top.drive(&mut scanner);
  if scanner.invalid {
    return Err(WarningKind::ComputedAssignment);
  };
  file.provides = scanner.provides;

  let mut marker = OccurrenceMarker {
    namespace: namespace.to_string(),
    provided: file.provides.iter().map(|p| p.name.clone()).collect(),
    requires: Vec::new(),
    invalid: false,
  };
  file.top.drive_mut(&mut marker);
  if marker.invalid {
    return Err(WarningKind::ComputedAccess);
  };
  file.requires = marker.requires;

  if references_namespace(&file.top, namespace) {
    return Err(WarningKind::ResidualNamespaceReference {
      namespace: namespace.to_string(),
    });
  };

  Ok(())
}
