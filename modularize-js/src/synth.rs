//! Builders for the synthetic syntax the rewriter injects. All nodes carry an
//! empty location.

use syntax_js::ast::expr::BinaryExpr;
use syntax_js::ast::expr::CallExpr;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::FuncExpr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::expr::LitBoolExpr;
use syntax_js::ast::expr::LitNumExpr;
use syntax_js::ast::expr::LitStrExpr;
use syntax_js::ast::expr::MemberExpr;
use syntax_js::ast::expr::UnaryExpr;
use syntax_js::ast::func::Func;
use syntax_js::ast::node::Node;
use syntax_js::ast::pat::IdPat;
use syntax_js::ast::stmt::ExprStmt;
use syntax_js::ast::stmt::IfStmt;
use syntax_js::ast::stmt::ReturnStmt;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stmt::VarDeclStmt;
use syntax_js::ast::stmt::VarDeclarator;
use syntax_js::loc::Loc;
use syntax_js::num::JsNumber;
use syntax_js::operator::OperatorName;

pub fn node<S: derive_visitor::Drive + derive_visitor::DriveMut>(stx: S) -> Node<S> {
  Node::new(Loc(0, 0), stx)
}

pub fn id(name: &str) -> Node<Expr> {
  node(IdExpr {
    name: name.to_string(),
  })
  .wrap(Expr::Id)
}

pub fn id_pat(name: &str) -> Node<IdPat> {
  node(IdPat {
    name: name.to_string(),
  })
}

pub fn str_lit(value: &str) -> Node<Expr> {
  node(LitStrExpr {
    value: value.to_string(),
  })
  .wrap(Expr::LitStr)
}

pub fn num(value: f64) -> Node<Expr> {
  node(LitNumExpr {
    value: JsNumber(value),
  })
  .wrap(Expr::LitNum)
}

pub fn bool_lit(value: bool) -> Node<Expr> {
  node(LitBoolExpr { value }).wrap(Expr::LitBool)
}

pub fn member(object: Node<Expr>, name: &str) -> Node<Expr> {
  node(MemberExpr {
    object,
    member: name.to_string(),
  })
  .wrap(Expr::Member)
}

pub fn call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  node(CallExpr { callee, arguments }).wrap(Expr::Call)
}

pub fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  node(BinaryExpr {
    operator,
    left,
    right,
  })
  .wrap(Expr::Binary)
}

pub fn assign(target: Node<Expr>, value: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::Assignment, target, value)
}

pub fn unary(operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  node(UnaryExpr { operator, argument }).wrap(Expr::Unary)
}

/// `!!value`
pub fn to_bool(value: Node<Expr>) -> Node<Expr> {
  unary(
    OperatorName::LogicalNot,
    unary(OperatorName::LogicalNot, value),
  )
}

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  node(ExprStmt { expr }).wrap(Stmt::Expr)
}

pub fn var_decl(declarators: Vec<(String, Option<Node<Expr>>)>) -> Node<Stmt> {
  node(VarDeclStmt {
    declarators: declarators
      .into_iter()
      .map(|(name, initializer)| {
        node(VarDeclarator {
          name: id_pat(&name),
          initializer,
        })
      })
      .collect(),
  })
  .wrap(Stmt::VarDecl)
}

/// `require('<module_path>')`
pub fn require_call(module_path: &str) -> Node<Expr> {
  call(id("require"), vec![str_lit(module_path)])
}

pub fn func_expr(body: Vec<Node<Stmt>>) -> Node<Expr> {
  node(FuncExpr {
    name: None,
    func: node(Func {
      parameters: Vec::new(),
      body,
    }),
  })
  .wrap(Expr::Func)
}

pub fn ret(value: Node<Expr>) -> Node<Stmt> {
  node(ReturnStmt { value: Some(value) }).wrap(Stmt::Return)
}

pub fn if_stmt(test: Node<Expr>, consequent: Node<Stmt>) -> Node<Stmt> {
  node(IfStmt {
    test,
    consequent,
    alternate: None,
  })
  .wrap(Stmt::If)
}
