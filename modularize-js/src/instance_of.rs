use crate::file::unique_name;
use crate::file::FileUnit;
use crate::synth;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::LitNullExpr;
use syntax_js::ast::node::Node;
use syntax_js::operator::OperatorName;

/// Built-in types whose `instanceof` checks are unreliable across realms and
/// get replaced with a tag comparison instead.
pub const NATIVE_CHECKS: [&str; 10] = [
  "Array",
  "ArrayBuffer",
  "Uint32Array",
  "Uint16Array",
  "String",
  "Function",
  "RegExp",
  "Number",
  "PositionSensorVRDevice",
  "HMDVRDevice",
];

type ExprNode = Node<Expr>;

enum CheckTarget {
  Namespace(String),
  Native(String),
}

#[derive(VisitorMut)]
#[visitor(ExprNode(exit))]
struct InstanceOfVisitor {
  namespace: String,
  instance_name: String,
  to_string_name: String,
  found: bool,
  found_native: bool,
}

impl InstanceOfVisitor {
  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    let target = match node.stx.as_ref() {
      Expr::Binary(b) if b.stx.operator == OperatorName::Instanceof => {
        match b.stx.right.stx.as_ref() {
          Expr::Member(m) => match m.stx.object.stx.as_ref() {
            Expr::Id(o) if o.stx.name == self.namespace => {
              Some(CheckTarget::Namespace(m.stx.member.clone()))
            }
            _ => None,
          },
          Expr::Id(i) if NATIVE_CHECKS.contains(&i.stx.name.as_str()) => {
            Some(CheckTarget::Native(i.stx.name.clone()))
          }
          _ => None,
        }
      }
      _ => None,
    };
    let Some(target) = target else {
      return;
    };

    let expr = std::mem::replace(&mut *node.stx, dummy_expr());
    let Expr::Binary(binary) = expr else {
      unreachable!("target check ensures a binary expression");
    };
    let left = binary.stx.left;
    let replacement = match target {
      CheckTarget::Namespace(type_name) => {
        self.found = true;
        namespace_check(&self.instance_name, &type_name, left)
      }
      CheckTarget::Native(type_name) => {
        self.found_native = true;
        native_check(&self.to_string_name, &type_name, left)
      }
    };
    *node.stx = *replacement.stx;
  }
}

fn dummy_expr() -> Expr {
  Expr::LitNull(synth::node(LitNullExpr {}))
}

/// `!!(<instance> = value) && !!<instance>.is<TypeName>` — evaluates the
/// value once, never throws for null or undefined, and answers the type
/// question through the duck-typing marker instead of identity.
fn namespace_check(instance_name: &str, type_name: &str, value: Node<Expr>) -> Node<Expr> {
  synth::binary(
    OperatorName::LogicalAnd,
    synth::to_bool(synth::assign(synth::id(instance_name), value)),
    synth::to_bool(synth::member(
      synth::id(instance_name),
      &format!("is{}", type_name),
    )),
  )
}

/// `<toString>.call(value).slice(8, -1) === '<TypeName>'` — realm-independent
/// structural tag comparison.
fn native_check(to_string_name: &str, type_name: &str, value: Node<Expr>) -> Node<Expr> {
  synth::binary(
    OperatorName::StrictEquality,
    synth::call(
      synth::member(
        synth::call(synth::member(synth::id(to_string_name), "call"), vec![value]),
        "slice",
      ),
      vec![
        synth::num(8.0),
        synth::unary(OperatorName::UnaryNegation, synth::num(1.0)),
      ],
    ),
    synth::str_lit(type_name),
  )
}

/// Rewrites every qualifying `instanceof` in the file and prepends the shared
/// locals the rewritten forms rely on. The two local names are reserved
/// whether or not they end up used.
pub fn rewrite_instance_of(file: &mut FileUnit, namespace: &str) {
  let instance_name = unique_name(&mut file.names, "instance");
  let to_string_name = unique_name(&mut file.names, "toString");
  let mut visitor = InstanceOfVisitor {
    namespace: namespace.to_string(),
    instance_name: instance_name.clone(),
    to_string_name: to_string_name.clone(),
    found: false,
    found_native: false,
  };
  file.top.drive_mut(&mut visitor);

  let body = &mut file.top.stx.body;
  if visitor.found {
    body.insert(0, synth::var_decl(vec![(instance_name, None)]));
  };
  if visitor.found_native {
    body.insert(
      0,
      synth::var_decl(vec![(
        to_string_name,
        Some(synth::member(
          synth::member(synth::id("Object"), "prototype"),
          "toString",
        )),
      )]),
    );
  };
}
