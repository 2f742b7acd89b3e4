use crate::ast::expr::Expr;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::operator::OperatorName;
use crate::parse;

fn parse_one(source: &str) -> Stmt {
  let top = parse(source).unwrap();
  let mut body = top.stx.body;
  assert_eq!(body.len(), 1);
  *body.pop().unwrap().stx
}

#[test]
fn parses_nested_member_assignment() {
  let Stmt::Expr(stmt) = parse_one("THREE.Vector3 = function (x, y, z) {};") else {
    panic!()
  };
  let Expr::Binary(assign) = &*stmt.stx.expr.stx else {
    panic!()
  };
  assert_eq!(assign.stx.operator, OperatorName::Assignment);
  let Expr::Member(member) = &*assign.stx.left.stx else {
    panic!()
  };
  assert_eq!(member.stx.member, "Vector3");
  let Expr::Id(object) = &*member.stx.object.stx else {
    panic!()
  };
  assert_eq!(object.stx.name, "THREE");
  assert!(matches!(&*assign.stx.right.stx, Expr::Func(_)));
}

#[test]
fn parses_operator_precedence() {
  let Stmt::Expr(stmt) = parse_one("a + b * c;") else {
    panic!()
  };
  let Expr::Binary(add) = &*stmt.stx.expr.stx else {
    panic!()
  };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = &*add.stx.right.stx else {
    panic!()
  };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);
}

#[test]
fn parses_instanceof_as_binary() {
  let Stmt::Expr(stmt) = parse_one("a instanceof THREE.Color;") else {
    panic!()
  };
  let Expr::Binary(binary) = &*stmt.stx.expr.stx else {
    panic!()
  };
  assert_eq!(binary.stx.operator, OperatorName::Instanceof);
}

#[test]
fn parses_new_with_member_callee() {
  let Stmt::Expr(stmt) = parse_one("new THREE.Vector3(1, 2, 3);") else {
    panic!()
  };
  let Expr::New(new) = &*stmt.stx.expr.stx else {
    panic!()
  };
  assert_eq!(new.stx.arguments.len(), 3);
  assert!(matches!(&*new.stx.callee.stx, Expr::Member(_)));
}

#[test]
fn new_without_args_binds_tighter_than_call() {
  // `new a.b()` is a construction with arguments, not a call of `new a.b`.
  let Stmt::Expr(stmt) = parse_one("new a.b();") else {
    panic!()
  };
  assert!(matches!(&*stmt.stx.expr.stx, Expr::New(_)));
}

#[test]
fn parses_for_in_with_decl() {
  let Stmt::ForIn(stmt) = parse_one("for (var k in obj) {}") else {
    panic!()
  };
  let ForInLhs::Decl(pat) = &stmt.stx.lhs else {
    panic!()
  };
  assert_eq!(pat.stx.name, "k");
}

#[test]
fn parses_conditional() {
  let Stmt::Expr(stmt) = parse_one("a ? b : c ? d : e;") else {
    panic!()
  };
  let Expr::Cond(outer) = &*stmt.stx.expr.stx else {
    panic!()
  };
  // Right associative: the second conditional nests in the alternate.
  assert!(matches!(&*outer.stx.alternate.stx, Expr::Cond(_)));
}

#[test]
fn asi_terminates_statements() {
  let top = parse("a = 1\nb = 2").unwrap();
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn asi_respects_restricted_return() {
  let Stmt::FunctionDecl(decl) = parse_one("function f() { return\n1 }") else {
    panic!()
  };
  let body = &decl.stx.func.stx.body;
  assert_eq!(body.len(), 2);
  let Stmt::Return(ret) = &*body[0].stx else {
    panic!()
  };
  assert!(ret.stx.value.is_none());
}

#[test]
fn regex_literal_in_expression_position() {
  let Stmt::Expr(stmt) = parse_one("/ab+c/.test(s);") else {
    panic!()
  };
  let Expr::Call(call) = &*stmt.stx.expr.stx else {
    panic!()
  };
  let Expr::Member(member) = &*call.stx.callee.stx else {
    panic!()
  };
  assert!(matches!(&*member.stx.object.stx, Expr::LitRegex(_)));
}

#[test]
fn rejects_invalid_assignment_target() {
  let err = parse("1 = a;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn rejects_try_without_catch_or_finally() {
  let err = parse("try { a() }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
}
