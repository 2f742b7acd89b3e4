use crate::file::unique_name;
use crate::file::FileUnit;
use crate::file::ProvideKind;
use crate::file::MARK;
use crate::path;
use crate::synth;
use ahash::HashMap;
use ahash::HashMapExt;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::operator::OperatorName;

/// One import declaration to synthesize: the required file, the names taken
/// from it, and whether the edge completes a cycle. Computed against the
/// frozen definition index before any file is rewritten.
pub struct ImportPlan {
  pub path: String,
  pub names: Vec<String>,
  pub circular: bool,
}

/// Where a marked occurrence of a property name redirects to.
#[derive(Clone)]
enum Redirect {
  /// Replace the whole member expression with this local.
  Local(String),
  /// Rebase onto the file's export surface.
  Exports,
  /// Rebase onto a directly imported module local.
  Module(String),
  /// Rebase onto `<module> || <getter>()`: use the cached local if the
  /// import already ran, otherwise force it now.
  Deferred { module: String, getter: String },
}

type ExprNode = Node<Expr>;

#[derive(VisitorMut)]
#[visitor(ExprNode(exit))]
struct RedirectApplier {
  plan: HashMap<String, Redirect>,
}

impl RedirectApplier {
  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    let redirect = {
      let Expr::Member(m) = node.stx.as_ref() else {
        return;
      };
      let marked = matches!(m.stx.object.stx.as_ref(), Expr::Id(id) if id.stx.name == MARK);
      if !marked {
        return;
      };
      match self.plan.get(&m.stx.member) {
        Some(redirect) => redirect.clone(),
        None => return,
      }
    };
    match redirect {
      Redirect::Local(local) => {
        *node.stx = *synth::id(&local).stx;
      }
      Redirect::Exports => set_object(node, synth::id("exports")),
      Redirect::Module(module) => set_object(node, synth::id(&module)),
      Redirect::Deferred { module, getter } => set_object(
        node,
        synth::binary(
          OperatorName::LogicalOr,
          synth::id(&module),
          synth::call(synth::id(&getter), Vec::new()),
        ),
      ),
    };
  }
}

fn set_object(node: &mut ExprNode, object: Node<Expr>) {
  if let Expr::Member(m) = node.stx.as_mut() {
    m.stx.object = object;
  };
}

/// `<local>.prototype.is<Name> = true;`
fn prototype_tag(local: &str, name: &str) -> Node<Stmt> {
  synth::expr_stmt(synth::assign(
    synth::member(
      synth::member(synth::id(local), "prototype"),
      &format!("is{}", name),
    ),
    synth::bool_lit(true),
  ))
}

/// `if (typeof exports.<Name> === 'function') exports.<Name>.prototype.is<Name> = true;`
fn guarded_prototype_tag(name: &str) -> Node<Stmt> {
  synth::if_stmt(
    synth::binary(
      OperatorName::StrictEquality,
      synth::unary(OperatorName::Typeof, synth::member(synth::id("exports"), name)),
      synth::str_lit("function"),
    ),
    synth::expr_stmt(synth::assign(
      synth::member(
        synth::member(synth::member(synth::id("exports"), name), "prototype"),
        &format!("is{}", name),
      ),
      synth::bool_lit(true),
    )),
  )
}

/// Rewrites one analyzed file in place to the explicit-import convention and
/// appends its forwarding statements to the aggregate entry point.
pub fn commonjsify(
  file: &mut FileUnit,
  imports: Vec<ImportPlan>,
  forwarding: &mut Vec<Node<Stmt>>,
) {
  let mut plan: HashMap<String, Redirect> = HashMap::new();
  let mut appends: Vec<Node<Stmt>> = Vec::new();

  let provides = file.provides.clone();
  for provide in &provides {
    let local = if provide.kind.safe_to_bind() {
      let local = unique_name(&mut file.names, &provide.name);
      file
        .top
        .stx
        .body
        .insert(0, synth::var_decl(vec![(local.clone(), None)]));
      plan.insert(provide.name.clone(), Redirect::Local(local.clone()));
      Some(local)
    } else {
      plan.insert(provide.name.clone(), Redirect::Exports);
      None
    };

    match (provide.kind, &local) {
      (ProvideKind::Func, Some(local)) => appends.push(prototype_tag(local, &provide.name)),
      (ProvideKind::Other, _) => appends.push(guarded_prototype_tag(&provide.name)),
      _ => {}
    };

    if let Some(local) = &local {
      appends.push(synth::expr_stmt(synth::assign(
        synth::member(synth::id("exports"), &provide.name),
        synth::id(local),
      )));
    };
  }

  for import in &imports {
    let rel = path::relative_module(&file.path, &import.path);
    let base = path::stem(&import.path).to_string();
    let module_name = unique_name(&mut file.names, &format!("{}Module", base));

    let declaration = if import.circular {
      let getter = unique_name(&mut file.names, &format!("get{}Module", base));
      for name in &import.names {
        plan.insert(name.clone(), Redirect::Deferred {
          module: module_name.clone(),
          getter: getter.clone(),
        });
      }
      // var <M>, <getM> = function () { return <M> = require('<rel>'); };
      synth::var_decl(vec![
        (module_name.clone(), None),
        (
          getter,
          Some(synth::func_expr(vec![synth::ret(synth::assign(
            synth::id(&module_name),
            synth::require_call(&rel),
          ))])),
        ),
      ])
    } else {
      for name in &import.names {
        plan.insert(name.clone(), Redirect::Module(module_name.clone()));
      }
      synth::var_decl(vec![(module_name, Some(synth::require_call(&rel)))])
    };
    file.top.stx.body.insert(0, declaration);
  }

  let mut applier = RedirectApplier { plan };
  file.top.stx.drive_mut(&mut applier);

  file.top.stx.body.extend(appends);

  let path_no_ext = file.path.strip_suffix(".js").unwrap_or(&file.path);
  match provides.len() {
    0 => {}
    1 => forwarding.push(synth::expr_stmt(synth::assign(
      synth::member(synth::id("exports"), &provides[0].name),
      synth::member(synth::require_call(path_no_ext), &provides[0].name),
    ))),
    _ => {
      forwarding.push(synth::var_decl(vec![(
        file.basename.clone(),
        Some(synth::require_call(path_no_ext)),
      )]));
      for provide in &provides {
        forwarding.push(synth::expr_stmt(synth::assign(
          synth::member(synth::id("exports"), &provide.name),
          synth::member(synth::id(&file.basename), &provide.name),
        )));
      }
    }
  };
}
