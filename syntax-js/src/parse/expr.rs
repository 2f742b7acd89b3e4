use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::LitArrExpr;
use crate::ast::expr::LitBoolExpr;
use crate::ast::expr::LitNullExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitRegexExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::node::Node;
use crate::ast::obj::ObjKey;
use crate::ast::obj::ObjMember;
use crate::ast::pat::IdPat;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::decode_str_literal;
use crate::lex::parse_num_literal;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::COND_PRECEDENCE;
use crate::operator::OPERATORS;
use crate::parse::Parser;
use crate::token::TT;

/// Lowest binary precedence that still excludes the comma operator; the level
/// of an AssignmentExpression.
pub const ASSIGNMENT_PRECEDENCE: u8 = 2;

fn multary_op(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::Ampersand => BitwiseAnd,
    TT::AmpersandAmpersand => LogicalAnd,
    TT::AmpersandEquals => AssignmentBitwiseAnd,
    TT::Asterisk => Multiplication,
    TT::AsteriskEquals => AssignmentMultiplication,
    TT::Bar => BitwiseOr,
    TT::BarBar => LogicalOr,
    TT::BarEquals => AssignmentBitwiseOr,
    TT::Caret => BitwiseXor,
    TT::CaretEquals => AssignmentBitwiseXor,
    TT::ChevronLeft => LessThan,
    TT::ChevronLeftChevronLeft => BitwiseLeftShift,
    TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
    TT::ChevronLeftEquals => LessThanOrEqual,
    TT::ChevronRight => GreaterThan,
    TT::ChevronRightChevronRight => BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
    TT::ChevronRightEquals => GreaterThanOrEqual,
    TT::Comma => Comma,
    TT::Equals => Assignment,
    TT::EqualsEquals => Equality,
    TT::EqualsEqualsEquals => StrictEquality,
    TT::ExclamationEquals => Inequality,
    TT::ExclamationEqualsEquals => StrictInequality,
    TT::Hyphen => Subtraction,
    TT::HyphenEquals => AssignmentSubtraction,
    TT::KeywordIn => In,
    TT::KeywordInstanceof => Instanceof,
    TT::Percent => Remainder,
    TT::PercentEquals => AssignmentRemainder,
    TT::Plus => Addition,
    TT::PlusEquals => AssignmentAddition,
    TT::Slash => Division,
    TT::SlashEquals => AssignmentDivision,
    _ => return None,
  })
}

fn is_assignment_op(op: OperatorName) -> bool {
  use OperatorName::*;
  matches!(
    op,
    Assignment
      | AssignmentAddition
      | AssignmentBitwiseAnd
      | AssignmentBitwiseLeftShift
      | AssignmentBitwiseOr
      | AssignmentBitwiseRightShift
      | AssignmentBitwiseUnsignedRightShift
      | AssignmentBitwiseXor
      | AssignmentDivision
      | AssignmentMultiplication
      | AssignmentRemainder
      | AssignmentSubtraction
  )
}

fn is_assignment_target(expr: &Expr) -> bool {
  matches!(
    expr,
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

fn is_identifier_name(typ: TT) -> bool {
  match typ {
    TT::Identifier
    | TT::KeywordBreak
    | TT::KeywordCase
    | TT::KeywordCatch
    | TT::KeywordContinue
    | TT::KeywordDebugger
    | TT::KeywordDefault
    | TT::KeywordDelete
    | TT::KeywordDo
    | TT::KeywordElse
    | TT::KeywordFinally
    | TT::KeywordFor
    | TT::KeywordFunction
    | TT::KeywordIf
    | TT::KeywordIn
    | TT::KeywordInstanceof
    | TT::KeywordNew
    | TT::KeywordReturn
    | TT::KeywordSwitch
    | TT::KeywordThis
    | TT::KeywordThrow
    | TT::KeywordTry
    | TT::KeywordTypeof
    | TT::KeywordVar
    | TT::KeywordVoid
    | TT::KeywordWhile
    | TT::KeywordWith
    | TT::LiteralFalse
    | TT::LiteralNull
    | TT::LiteralTrue => true,
    _ => false,
  }
}

impl<'a> Parser<'a> {
  /// Parses an expression with binary operators of precedence `min_prec` or
  /// tighter. `no_in` excludes the `in` operator, for `for` statement heads.
  pub fn parse_expr(&mut self, min_prec: u8, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let mut left = self.parse_unary(no_in)?;
    loop {
      let t = self.peek()?;
      if t.typ == TT::Question {
        if COND_PRECEDENCE < min_prec {
          break;
        }
        self.consume()?;
        // The consequent is an AssignmentExpression; `in` is always allowed
        // inside it as the `?:` brackets it away from any `for` head.
        let consequent = self.parse_expr(ASSIGNMENT_PRECEDENCE, false)?;
        self.require(TT::Colon)?;
        let alternate = self.parse_expr(ASSIGNMENT_PRECEDENCE, no_in)?;
        let loc = left.loc + alternate.loc;
        left = Node::new(loc, CondExpr {
          test: left,
          consequent,
          alternate,
        })
        .wrap(Expr::Cond);
        continue;
      }
      let Some(op_name) = multary_op(t.typ) else {
        break;
      };
      if no_in && op_name == OperatorName::In {
        break;
      }
      let op = &OPERATORS[&op_name];
      if op.precedence < min_prec {
        break;
      }
      if is_assignment_op(op_name) && !is_assignment_target(&left.stx) {
        return Err(left.error(SyntaxErrorType::InvalidAssignmentTarget));
      }
      self.consume()?;
      let next_min_prec = match op.associativity {
        Associativity::Left => op.precedence + 1,
        Associativity::Right => op.precedence,
      };
      let right = self.parse_expr(next_min_prec, no_in)?;
      let loc = left.loc + right.loc;
      left = Node::new(loc, BinaryExpr {
        operator: op_name,
        left,
        right,
      })
      .wrap(Expr::Binary);
    }
    Ok(left)
  }

  fn parse_unary(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    use OperatorName::*;
    let t = self.peek()?;
    let operator = match t.typ {
      TT::Exclamation => LogicalNot,
      TT::Hyphen => UnaryNegation,
      TT::HyphenHyphen => PrefixDecrement,
      TT::KeywordDelete => Delete,
      TT::KeywordTypeof => Typeof,
      TT::KeywordVoid => Void,
      TT::Plus => UnaryPlus,
      TT::PlusPlus => PrefixIncrement,
      TT::Tilde => BitwiseNot,
      _ => return self.parse_postfix(no_in),
    };
    self.consume()?;
    let argument = self.parse_unary(no_in)?;
    let loc = t.loc + argument.loc;
    Ok(Node::new(loc, UnaryExpr { operator, argument }).wrap(Expr::Unary))
  }

  fn parse_postfix(&mut self, _no_in: bool) -> SyntaxResult<Node<Expr>> {
    let operand = self.parse_member_chain(true)?;
    let t = self.peek()?;
    let operator = match t.typ {
      TT::PlusPlus if !t.after_line_terminator => OperatorName::PostfixIncrement,
      TT::HyphenHyphen if !t.after_line_terminator => OperatorName::PostfixDecrement,
      _ => return Ok(operand),
    };
    if !is_assignment_target(&operand.stx) {
      return Err(operand.error(SyntaxErrorType::InvalidAssignmentTarget));
    }
    self.consume()?;
    let loc = operand.loc + t.loc;
    Ok(
      Node::new(loc, UnaryPostfixExpr {
        operator,
        argument: operand,
      })
      .wrap(Expr::UnaryPostfix),
    )
  }

  /// Parses a primary expression followed by any chain of member accesses and,
  /// if `allow_call`, calls. `new` callees use this with calls disallowed so
  /// that trailing arguments bind to the `new`.
  fn parse_member_chain(&mut self, allow_call: bool) -> SyntaxResult<Node<Expr>> {
    let mut operand = if self.peek()?.typ == TT::KeywordNew {
      self.parse_new()?
    } else {
      self.parse_primary()?
    };
    loop {
      let t = self.peek()?;
      match t.typ {
        TT::Dot => {
          self.consume()?;
          let name = self.consume()?;
          if !is_identifier_name(name.typ) {
            return Err(name.error(SyntaxErrorType::ExpectedSyntax("member name")));
          }
          let loc = operand.loc + name.loc;
          operand = Node::new(loc, MemberExpr {
            object: operand,
            member: self.string(name.loc),
          })
          .wrap(Expr::Member);
        }
        TT::BracketOpen => {
          self.consume()?;
          let member = self.parse_expr(1, false)?;
          let close = self.require(TT::BracketClose)?;
          let loc = operand.loc + close.loc;
          operand = Node::new(loc, ComputedMemberExpr {
            object: operand,
            member,
          })
          .wrap(Expr::ComputedMember);
        }
        TT::ParenthesisOpen if allow_call => {
          let (arguments, close) = self.parse_call_args()?;
          let loc = operand.loc + close;
          operand = Node::new(loc, CallExpr {
            callee: operand,
            arguments,
          })
          .wrap(Expr::Call);
        }
        _ => break,
      };
    }
    Ok(operand)
  }

  fn parse_new(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordNew)?;
    let callee = self.parse_member_chain(false)?;
    let mut loc = start.loc + callee.loc;
    let mut arguments = Vec::new();
    if self.peek()?.typ == TT::ParenthesisOpen {
      let (args, close) = self.parse_call_args()?;
      arguments = args;
      loc += close;
    };
    Ok(Node::new(loc, NewExpr { callee, arguments }).wrap(Expr::New))
  }

  fn parse_call_args(&mut self) -> SyntaxResult<(Vec<Node<Expr>>, Loc)> {
    self.require(TT::ParenthesisOpen)?;
    let mut arguments = Vec::new();
    loop {
      if self.peek()?.typ == TT::ParenthesisClose {
        break;
      }
      arguments.push(self.parse_expr(ASSIGNMENT_PRECEDENCE, false)?);
      if self.consume_if(TT::Comma)?.is_none() {
        break;
      }
    }
    let close = self.require(TT::ParenthesisClose)?;
    Ok((arguments, close.loc))
  }

  fn parse_primary(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek()?;
    Ok(match t.typ {
      TT::Identifier => {
        self.consume()?;
        Node::new(t.loc, IdExpr {
          name: self.string(t.loc),
        })
        .wrap(Expr::Id)
      }
      TT::KeywordThis => {
        self.consume()?;
        Node::new(t.loc, ThisExpr {}).wrap(Expr::This)
      }
      TT::LiteralString => {
        self.consume()?;
        Node::new(t.loc, LitStrExpr {
          value: decode_str_literal(self.str(t.loc)),
        })
        .wrap(Expr::LitStr)
      }
      TT::LiteralNumber => {
        self.consume()?;
        let value = parse_num_literal(self.str(t.loc))
          .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
        Node::new(t.loc, LitNumExpr {
          value: JsNumber(value),
        })
        .wrap(Expr::LitNum)
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        self.consume()?;
        Node::new(t.loc, LitBoolExpr {
          value: t.typ == TT::LiteralTrue,
        })
        .wrap(Expr::LitBool)
      }
      TT::LiteralNull => {
        self.consume()?;
        Node::new(t.loc, LitNullExpr {}).wrap(Expr::LitNull)
      }
      TT::BracketOpen => self.parse_lit_arr()?,
      TT::BraceOpen => self.parse_lit_obj()?,
      TT::KeywordFunction => self.parse_func_expr()?,
      TT::ParenthesisOpen => {
        self.consume()?;
        let grouped = self.parse_expr(1, false)?;
        self.require(TT::ParenthesisClose)?;
        grouped
      }
      // A slash in a primary position starts a regex literal.
      TT::Slash | TT::SlashEquals => {
        let t = self.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
        Node::new(t.loc, LitRegexExpr {
          value: self.string(t.loc),
        })
        .wrap(Expr::LitRegex)
      }
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    })
  }

  fn parse_lit_arr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BracketOpen)?;
    let mut elements = Vec::new();
    loop {
      if self.peek()?.typ == TT::BracketClose {
        break;
      }
      elements.push(self.parse_expr(ASSIGNMENT_PRECEDENCE, false)?);
      if self.consume_if(TT::Comma)?.is_none() {
        break;
      }
    }
    let close = self.require(TT::BracketClose)?;
    Ok(Node::new(start.loc + close.loc, LitArrExpr { elements }).wrap(Expr::LitArr))
  }

  fn parse_lit_obj(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.peek()?.typ == TT::BraceClose {
        break;
      }
      let key_tok = self.consume()?;
      let key = match key_tok.typ {
        TT::LiteralString => ObjKey::Str(decode_str_literal(self.str(key_tok.loc))),
        TT::LiteralNumber => ObjKey::Num(JsNumber(
          parse_num_literal(self.str(key_tok.loc))
            .ok_or_else(|| key_tok.error(SyntaxErrorType::MalformedLiteralNumber))?,
        )),
        typ if is_identifier_name(typ) => ObjKey::Ident(self.string(key_tok.loc)),
        _ => return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("property name"))),
      };
      self.require(TT::Colon)?;
      let value = self.parse_expr(ASSIGNMENT_PRECEDENCE, false)?;
      let loc = key_tok.loc + value.loc;
      members.push(Node::new(loc, ObjMember { key, value }));
      if self.consume_if(TT::Comma)?.is_none() {
        break;
      }
    }
    let close = self.require(TT::BraceClose)?;
    Ok(Node::new(start.loc + close.loc, LitObjExpr { members }).wrap(Expr::LitObj))
  }

  fn parse_func_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordFunction)?;
    let name = match self.consume_if(TT::Identifier)? {
      Some(t) => Some(Node::new(t.loc, IdPat {
        name: self.string(t.loc),
      })),
      None => None,
    };
    let func = self.parse_func()?;
    let loc = start.loc + func.loc;
    Ok(Node::new(loc, FuncExpr { name, func }).wrap(Expr::Func))
  }
}
