use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::obj::ObjKey;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForTripleInit;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDeclStmt;
use crate::ast::stx::TopLevel;
use crate::operator::OperatorName;
use crate::operator::Associativity;
use crate::operator::COND_PRECEDENCE;
use crate::operator::OPERATORS;

const PRECEDENCE_CALL_MEMBER: u8 = 18;
const PRECEDENCE_PRIMARY: u8 = 19;

/// Generates readable source code from a syntax tree. Statements end with
/// newlines and nest with tab indentation; parentheses are derived from
/// operator precedence, not from the original source.
pub fn generate(top: &Node<TopLevel>) -> String {
  let mut emitter = Emitter {
    out: String::new(),
    depth: 0,
  };
  for stmt in &top.stx.body {
    emitter.stmt(stmt);
  }
  emitter.out
}

fn op_syntax(name: OperatorName) -> &'static str {
  use OperatorName::*;
  match name {
    Addition => "+",
    Assignment => "=",
    AssignmentAddition => "+=",
    AssignmentBitwiseAnd => "&=",
    AssignmentBitwiseLeftShift => "<<=",
    AssignmentBitwiseOr => "|=",
    AssignmentBitwiseRightShift => ">>=",
    AssignmentBitwiseUnsignedRightShift => ">>>=",
    AssignmentBitwiseXor => "^=",
    AssignmentDivision => "/=",
    AssignmentMultiplication => "*=",
    AssignmentRemainder => "%=",
    AssignmentSubtraction => "-=",
    BitwiseAnd => "&",
    BitwiseLeftShift => "<<",
    BitwiseNot => "~",
    BitwiseOr => "|",
    BitwiseRightShift => ">>",
    BitwiseUnsignedRightShift => ">>>",
    BitwiseXor => "^",
    Comma => ",",
    Delete => "delete",
    Division => "/",
    Equality => "==",
    GreaterThan => ">",
    GreaterThanOrEqual => ">=",
    In => "in",
    Inequality => "!=",
    Instanceof => "instanceof",
    LessThan => "<",
    LessThanOrEqual => "<=",
    LogicalAnd => "&&",
    LogicalNot => "!",
    LogicalOr => "||",
    Multiplication => "*",
    PostfixDecrement | PrefixDecrement => "--",
    PostfixIncrement | PrefixIncrement => "++",
    Remainder => "%",
    StrictEquality => "===",
    StrictInequality => "!==",
    Subtraction => "-",
    Typeof => "typeof",
    UnaryNegation => "-",
    UnaryPlus => "+",
    Void => "void",
  }
}

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Binary(n) => OPERATORS[&n.stx.operator].precedence,
    Expr::Cond(_) => COND_PRECEDENCE,
    Expr::Unary(_) => 14,
    Expr::UnaryPostfix(_) => 15,
    Expr::Call(_) | Expr::ComputedMember(_) | Expr::Member(_) | Expr::New(_) => {
      PRECEDENCE_CALL_MEMBER
    }
    _ => PRECEDENCE_PRIMARY,
  }
}

/// Whether the leftmost token of this expression would begin a function
/// expression or object literal, which a statement position would misparse.
fn starts_with_func_or_obj(expr: &Expr) -> bool {
  match expr {
    Expr::Func(_) | Expr::LitObj(_) => true,
    Expr::Binary(n) => starts_with_func_or_obj(&n.stx.left.stx),
    Expr::Cond(n) => starts_with_func_or_obj(&n.stx.test.stx),
    Expr::Call(n) => starts_with_func_or_obj(&n.stx.callee.stx),
    Expr::Member(n) => starts_with_func_or_obj(&n.stx.object.stx),
    Expr::ComputedMember(n) => starts_with_func_or_obj(&n.stx.object.stx),
    Expr::UnaryPostfix(n) => starts_with_func_or_obj(&n.stx.argument.stx),
    _ => false,
  }
}

fn emit_str_literal(out: &mut String, value: &str) {
  out.push('\'');
  for c in value.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
      c => out.push(c),
    };
  }
  out.push('\'');
}

struct Emitter {
  out: String,
  depth: usize,
}

impl Emitter {
  fn indent(&mut self) {
    for _ in 0..self.depth {
      self.out.push('\t');
    }
  }

  fn stmt(&mut self, n: &Node<Stmt>) {
    self.indent();
    self.stmt_content(n);
    self.out.push('\n');
  }

  fn stmt_content(&mut self, n: &Node<Stmt>) {
    match &*n.stx {
      Stmt::Block(n) => {
        self.out.push_str("{\n");
        self.depth += 1;
        for stmt in &n.stx.body {
          self.stmt(stmt);
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
      }
      Stmt::Break(n) => {
        self.out.push_str("break");
        if let Some(label) = &n.stx.label {
          self.out.push(' ');
          self.out.push_str(label);
        };
        self.out.push(';');
      }
      Stmt::Continue(n) => {
        self.out.push_str("continue");
        if let Some(label) = &n.stx.label {
          self.out.push(' ');
          self.out.push_str(label);
        };
        self.out.push(';');
      }
      Stmt::Debugger(_) => self.out.push_str("debugger;"),
      Stmt::DoWhile(n) => {
        self.out.push_str("do ");
        self.child_stmt_inline(&n.stx.body);
        self.out.push_str(" while (");
        self.expr(&n.stx.condition, 1);
        self.out.push_str(");");
      }
      Stmt::Empty(_) => self.out.push(';'),
      Stmt::Expr(n) => {
        if starts_with_func_or_obj(&n.stx.expr.stx) {
          self.out.push('(');
          self.expr(&n.stx.expr, 1);
          self.out.push(')');
        } else {
          self.expr(&n.stx.expr, 1);
        };
        self.out.push(';');
      }
      Stmt::ForIn(n) => {
        self.out.push_str("for (");
        match &n.stx.lhs {
          ForInLhs::Assign(e) => self.expr(e, PRECEDENCE_CALL_MEMBER),
          ForInLhs::Decl(pat) => {
            self.out.push_str("var ");
            self.out.push_str(&pat.stx.name);
          }
        };
        self.out.push_str(" in ");
        self.expr(&n.stx.rhs, 2);
        self.out.push_str(") ");
        self.child_stmt_inline(&n.stx.body);
      }
      Stmt::ForTriple(n) => {
        self.out.push_str("for (");
        match &n.stx.init {
          ForTripleInit::None => {}
          ForTripleInit::Expr(e) => self.expr(e, 1),
          ForTripleInit::Decl(decl) => self.var_decl(decl),
        };
        self.out.push(';');
        if let Some(condition) = &n.stx.condition {
          self.out.push(' ');
          self.expr(condition, 1);
        };
        self.out.push(';');
        if let Some(post) = &n.stx.post {
          self.out.push(' ');
          self.expr(post, 1);
        };
        self.out.push_str(") ");
        self.child_stmt_inline(&n.stx.body);
      }
      Stmt::FunctionDecl(n) => {
        self.out.push_str("function ");
        self.out.push_str(&n.stx.name.stx.name);
        self.func(&n.stx.func);
      }
      Stmt::If(n) => {
        self.out.push_str("if (");
        self.expr(&n.stx.test, 1);
        self.out.push_str(") ");
        self.child_stmt_inline(&n.stx.consequent);
        if let Some(alternate) = &n.stx.alternate {
          self.out.push_str(" else ");
          self.child_stmt_inline(alternate);
        };
      }
      Stmt::Label(n) => {
        self.out.push_str(&n.stx.name);
        self.out.push_str(": ");
        self.stmt_content(&n.stx.statement);
      }
      Stmt::Return(n) => {
        self.out.push_str("return");
        if let Some(value) = &n.stx.value {
          self.out.push(' ');
          self.expr(value, 1);
        };
        self.out.push(';');
      }
      Stmt::Switch(n) => {
        self.out.push_str("switch (");
        self.expr(&n.stx.test, 1);
        self.out.push_str(") {\n");
        self.depth += 1;
        for branch in &n.stx.branches {
          self.indent();
          match &branch.stx.case {
            Some(case) => {
              self.out.push_str("case ");
              self.expr(case, 1);
              self.out.push(':');
            }
            None => self.out.push_str("default:"),
          };
          self.out.push('\n');
          self.depth += 1;
          for stmt in &branch.stx.body {
            self.stmt(stmt);
          }
          self.depth -= 1;
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
      }
      Stmt::Throw(n) => {
        self.out.push_str("throw ");
        self.expr(&n.stx.value, 1);
        self.out.push(';');
      }
      Stmt::Try(n) => {
        self.out.push_str("try ");
        self.block_body(&n.stx.wrapped);
        if let Some(catch) = &n.stx.catch {
          self.out.push_str(" catch (");
          self.out.push_str(&catch.stx.parameter.stx.name);
          self.out.push_str(") ");
          self.block_body(&catch.stx.body);
        };
        if let Some(finally) = &n.stx.finally {
          self.out.push_str(" finally ");
          self.block_body(finally);
        };
      }
      Stmt::VarDecl(n) => {
        self.var_decl(n);
        self.out.push(';');
      }
      Stmt::While(n) => {
        self.out.push_str("while (");
        self.expr(&n.stx.condition, 1);
        self.out.push_str(") ");
        self.child_stmt_inline(&n.stx.body);
      }
    };
  }

  /// Emits a nested statement that continues the current line, as the body of
  /// `if`, `while` and friends.
  fn child_stmt_inline(&mut self, n: &Node<Stmt>) {
    self.stmt_content(n);
  }

  fn block_body(&mut self, body: &[Node<Stmt>]) {
    self.out.push_str("{\n");
    self.depth += 1;
    for stmt in body {
      self.stmt(stmt);
    }
    self.depth -= 1;
    self.indent();
    self.out.push('}');
  }

  fn var_decl(&mut self, n: &Node<VarDeclStmt>) {
    self.out.push_str("var ");
    for (i, declarator) in n.stx.declarators.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      };
      self.out.push_str(&declarator.stx.name.stx.name);
      if let Some(initializer) = &declarator.stx.initializer {
        self.out.push_str(" = ");
        self.expr(initializer, 2);
      };
    }
  }

  fn func(&mut self, n: &Node<Func>) {
    self.out.push('(');
    for (i, parameter) in n.stx.parameters.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      };
      self.out.push_str(&parameter.stx.name);
    }
    self.out.push_str(") ");
    self.block_body(&n.stx.body);
  }

  fn expr(&mut self, n: &Node<Expr>, min_prec: u8) {
    let parenthesize = precedence(&n.stx) < min_prec;
    if parenthesize {
      self.out.push('(');
    };
    self.expr_content(n);
    if parenthesize {
      self.out.push(')');
    };
  }

  fn expr_content(&mut self, n: &Node<Expr>) {
    match &*n.stx {
      Expr::Binary(n) => {
        let op = &OPERATORS[&n.stx.operator];
        let (left_min, right_min) = match op.associativity {
          Associativity::Left => (op.precedence, op.precedence + 1),
          Associativity::Right => (op.precedence + 1, op.precedence),
        };
        self.expr(&n.stx.left, left_min);
        if n.stx.operator == OperatorName::Comma {
          self.out.push_str(", ");
        } else {
          self.out.push(' ');
          self.out.push_str(op_syntax(n.stx.operator));
          self.out.push(' ');
        };
        self.expr(&n.stx.right, right_min);
      }
      Expr::Call(n) => {
        self.expr(&n.stx.callee, PRECEDENCE_CALL_MEMBER);
        self.call_args(&n.stx.arguments);
      }
      Expr::ComputedMember(n) => {
        self.expr(&n.stx.object, PRECEDENCE_CALL_MEMBER);
        self.out.push('[');
        self.expr(&n.stx.member, 1);
        self.out.push(']');
      }
      Expr::Cond(n) => {
        self.expr(&n.stx.test, COND_PRECEDENCE + 1);
        self.out.push_str(" ? ");
        self.expr(&n.stx.consequent, 2);
        self.out.push_str(" : ");
        self.expr(&n.stx.alternate, 2);
      }
      Expr::Func(n) => {
        self.out.push_str("function ");
        if let Some(name) = &n.stx.name {
          self.out.push_str(&name.stx.name);
        };
        self.func(&n.stx.func);
      }
      Expr::Id(n) => self.out.push_str(&n.stx.name),
      Expr::Member(n) => {
        // A number literal would absorb the dot into its fraction.
        let guard = matches!(&*n.stx.object.stx, Expr::LitNum(_));
        if guard {
          self.out.push('(');
        };
        self.expr(&n.stx.object, PRECEDENCE_CALL_MEMBER);
        if guard {
          self.out.push(')');
        };
        self.out.push('.');
        self.out.push_str(&n.stx.member);
      }
      Expr::New(n) => {
        self.out.push_str("new ");
        // A call in the callee would hand the `new` arguments to the callee.
        let guard = matches!(&*n.stx.callee.stx, Expr::Call(_));
        if guard {
          self.out.push('(');
        };
        self.expr(&n.stx.callee, PRECEDENCE_CALL_MEMBER);
        if guard {
          self.out.push(')');
        };
        self.call_args(&n.stx.arguments);
      }
      Expr::This(_) => self.out.push_str("this"),
      Expr::Unary(n) => {
        use OperatorName::*;
        self.out.push_str(op_syntax(n.stx.operator));
        let sign_leading = |e: &Expr| match e {
          Expr::Unary(inner) => matches!(
            inner.stx.operator,
            UnaryNegation | UnaryPlus | PrefixDecrement | PrefixIncrement
          ),
          _ => false,
        };
        match n.stx.operator {
          Typeof | Void | Delete => self.out.push(' '),
          UnaryNegation | UnaryPlus | PrefixDecrement | PrefixIncrement
            if sign_leading(&n.stx.argument.stx) =>
          {
            self.out.push(' ')
          }
          _ => {}
        };
        self.expr(&n.stx.argument, 14);
      }
      Expr::UnaryPostfix(n) => {
        self.expr(&n.stx.argument, 15);
        self.out.push_str(op_syntax(n.stx.operator));
      }
      Expr::LitArr(n) => {
        self.out.push('[');
        for (i, element) in n.stx.elements.iter().enumerate() {
          if i > 0 {
            self.out.push_str(", ");
          };
          self.expr(element, 2);
        }
        self.out.push(']');
      }
      Expr::LitBool(n) => self.out.push_str(if n.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.out.push_str("null"),
      Expr::LitNum(n) => self.out.push_str(&n.stx.value.to_string()),
      Expr::LitObj(n) => {
        if n.stx.members.is_empty() {
          self.out.push_str("{}");
          return;
        };
        self.out.push_str("{\n");
        self.depth += 1;
        for (i, member) in n.stx.members.iter().enumerate() {
          self.indent();
          match &member.stx.key {
            ObjKey::Ident(name) => self.out.push_str(name),
            ObjKey::Num(value) => self.out.push_str(&value.to_string()),
            ObjKey::Str(value) => emit_str_literal(&mut self.out, value),
          };
          self.out.push_str(": ");
          self.expr(&member.stx.value, 2);
          if i + 1 < n.stx.members.len() {
            self.out.push(',');
          };
          self.out.push('\n');
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
      }
      Expr::LitRegex(n) => self.out.push_str(&n.stx.value),
      Expr::LitStr(n) => emit_str_literal(&mut self.out, &n.stx.value),
    };
  }

  fn call_args(&mut self, arguments: &[Node<Expr>]) {
    self.out.push('(');
    for (i, argument) in arguments.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      };
      self.expr(argument, 2);
    }
    self.out.push(')');
  }
}

#[cfg(test)]
mod tests {
  use crate::parse;

  fn cycle(source: &str) -> String {
    super::generate(&parse(source).unwrap())
  }

  #[test]
  fn emits_simple_statements() {
    assert_eq!(cycle("var a=1,b;"), "var a = 1, b;\n");
    assert_eq!(cycle("a.b.c ( 1,2 )"), "a.b.c(1, 2);\n");
  }

  #[test]
  fn emits_precedence_parens() {
    assert_eq!(cycle("(a + b) * c;"), "(a + b) * c;\n");
    assert_eq!(cycle("a + b * c;"), "a + b * c;\n");
    assert_eq!(cycle("(a = b) && c;"), "(a = b) && c;\n");
  }

  #[test]
  fn emits_function_expr_statement_parenthesized() {
    assert_eq!(cycle("(function () {})();"), "(function () {\n}());\n");
  }

  #[test]
  fn emits_new_with_call_callee_parenthesized() {
    assert_eq!(cycle("new (f())();"), "new (f())();\n");
  }

  #[test]
  fn emits_nested_blocks_with_tabs() {
    assert_eq!(
      cycle("function f(a){if(a){return 1}return 2}"),
      "function f(a) {\n\tif (a) {\n\t\treturn 1;\n\t}\n\treturn 2;\n}\n"
    );
  }

  #[test]
  fn emits_string_escapes() {
    assert_eq!(cycle("a = 'x\\ny';"), "a = 'x\\ny';\n");
    assert_eq!(cycle("a = \"it's\";"), "a = 'it\\'s';\n");
  }

  #[test]
  fn emits_multiline_object_literals() {
    assert_eq!(
      cycle("a = { x: 1, 'y z': 2 };"),
      "a = {\n\tx: 1,\n\t'y z': 2\n};\n"
    );
  }

  #[test]
  fn emits_negative_negation_with_space() {
    assert_eq!(cycle("a = - -b;"), "a = - -b;\n");
  }
}
