use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::pat::IdPat;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForTripleInit;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::FunctionDeclStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::VarDeclStmt;
use crate::ast::stmt::VarDeclarator;
use crate::ast::stmt::WhileStmt;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::parse::expr::ASSIGNMENT_PRECEDENCE;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek()?.typ != TT::EOF {
      body.push(self.parse_stmt()?);
    }
    Ok(Node::new(self.lexer.source_range(), TopLevel { body }))
  }

  /// Consumes a statement terminator: an explicit semicolon, or one inserted
  /// automatically before `}`, the end of input, or a line terminator.
  fn semicolon(&mut self) -> SyntaxResult<()> {
    let t = self.peek()?;
    match t.typ {
      TT::Semicolon => {
        self.consume()?;
      }
      TT::BraceClose | TT::EOF => {}
      _ if t.after_line_terminator => {}
      _ => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon))),
    };
    Ok(())
  }

  pub fn parse_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek()?;
    match t.typ {
      TT::BraceOpen => self.parse_stmt_block(),
      TT::KeywordBreak => self.parse_stmt_break(),
      TT::KeywordContinue => self.parse_stmt_continue(),
      TT::KeywordDebugger => {
        let t = self.consume()?;
        self.semicolon()?;
        Ok(Node::new(t.loc, DebuggerStmt {}).wrap(Stmt::Debugger))
      }
      TT::KeywordDo => self.parse_stmt_do_while(),
      TT::KeywordFor => self.parse_stmt_for(),
      TT::KeywordFunction => self.parse_stmt_function_decl(),
      TT::KeywordIf => self.parse_stmt_if(),
      TT::KeywordReturn => self.parse_stmt_return(),
      TT::KeywordSwitch => self.parse_stmt_switch(),
      TT::KeywordThrow => self.parse_stmt_throw(),
      TT::KeywordTry => self.parse_stmt_try(),
      TT::KeywordVar => {
        let decl = self.parse_var_decl(false)?;
        self.semicolon()?;
        Ok(decl.wrap(Stmt::VarDecl))
      }
      TT::KeywordWhile => self.parse_stmt_while(),
      TT::Semicolon => {
        let t = self.consume()?;
        Ok(Node::new(t.loc, EmptyStmt {}).wrap(Stmt::Empty))
      }
      TT::Identifier => {
        let (_, next) = self.peek_2()?;
        if next.typ == TT::Colon {
          self.parse_stmt_label()
        } else {
          self.parse_stmt_expr()
        }
      }
      _ => self.parse_stmt_expr(),
    }
  }

  fn parse_id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    let t = self.require(TT::Identifier)?;
    Ok(Node::new(t.loc, IdPat {
      name: self.string(t.loc),
    }))
  }

  /// Parses the parameter list and body of a function, starting at the `(`.
  pub fn parse_func(&mut self) -> SyntaxResult<Node<Func>> {
    let start = self.require(TT::ParenthesisOpen)?;
    let mut parameters = Vec::new();
    loop {
      if self.peek()?.typ == TT::ParenthesisClose {
        break;
      }
      parameters.push(self.parse_id_pat()?);
      if self.consume_if(TT::Comma)?.is_none() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    while self.peek()?.typ != TT::BraceClose {
      body.push(self.parse_stmt()?);
    }
    let close = self.require(TT::BraceClose)?;
    Ok(Node::new(start.loc + close.loc, Func { parameters, body }))
  }

  fn parse_stmt_block(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    while self.peek()?.typ != TT::BraceClose {
      body.push(self.parse_stmt()?);
    }
    let close = self.require(TT::BraceClose)?;
    Ok(Node::new(start.loc + close.loc, BlockStmt { body }).wrap(Stmt::Block))
  }

  fn parse_stmt_break(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordBreak)?;
    let mut loc = start.loc;
    let next = self.peek()?;
    let label = if next.typ == TT::Identifier && !next.after_line_terminator {
      self.consume()?;
      loc += next.loc;
      Some(self.string(next.loc))
    } else {
      None
    };
    self.semicolon()?;
    Ok(Node::new(loc, BreakStmt { label }).wrap(Stmt::Break))
  }

  fn parse_stmt_continue(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordContinue)?;
    let mut loc = start.loc;
    let next = self.peek()?;
    let label = if next.typ == TT::Identifier && !next.after_line_terminator {
      self.consume()?;
      loc += next.loc;
      Some(self.string(next.loc))
    } else {
      None
    };
    self.semicolon()?;
    Ok(Node::new(loc, ContinueStmt { label }).wrap(Stmt::Continue))
  }

  fn parse_stmt_do_while(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordDo)?;
    let body = self.parse_stmt()?;
    self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let condition = self.parse_expr(1, false)?;
    let close = self.require(TT::ParenthesisClose)?;
    // The semicolon after `do..while(..)` is always optional.
    self.consume_if(TT::Semicolon)?;
    Ok(Node::new(start.loc + close.loc, DoWhileStmt { body, condition }).wrap(Stmt::DoWhile))
  }

  fn parse_stmt_for(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?;
    self.require(TT::ParenthesisOpen)?;
    let next = self.peek()?;
    let init = match next.typ {
      TT::Semicolon => ForTripleInit::None,
      TT::KeywordVar => {
        let decl = self.parse_var_decl(true)?;
        if self.peek()?.typ == TT::KeywordIn {
          let loc = decl.loc;
          let mut stx = decl.stx;
          if stx.declarators.len() != 1 || stx.declarators[0].stx.initializer.is_some() {
            return Err(loc.error(SyntaxErrorType::ExpectedSyntax("for-in target"), None));
          }
          let declarator = stx.declarators.pop().unwrap();
          return self.parse_stmt_for_in(start.loc, ForInLhs::Decl(declarator.stx.name));
        }
        ForTripleInit::Decl(decl)
      }
      _ => {
        let expr = self.parse_expr(1, true)?;
        if self.peek()?.typ == TT::KeywordIn {
          return self.parse_stmt_for_in(start.loc, ForInLhs::Assign(expr));
        }
        ForTripleInit::Expr(expr)
      }
    };
    self.require(TT::Semicolon)?;
    let condition = if self.peek()?.typ == TT::Semicolon {
      None
    } else {
      Some(self.parse_expr(1, false)?)
    };
    self.require(TT::Semicolon)?;
    let post = if self.peek()?.typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.parse_expr(1, false)?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start.loc + body.loc;
    Ok(
      Node::new(loc, ForTripleStmt {
        init,
        condition,
        post,
        body,
      })
      .wrap(Stmt::ForTriple),
    )
  }

  fn parse_stmt_for_in(&mut self, start: Loc, lhs: ForInLhs) -> SyntaxResult<Node<Stmt>> {
    self.require(TT::KeywordIn)?;
    let rhs = self.parse_expr(1, false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start + body.loc;
    Ok(Node::new(loc, ForInStmt { lhs, rhs, body }).wrap(Stmt::ForIn))
  }

  fn parse_stmt_function_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFunction)?;
    let name = self.parse_id_pat()?;
    let func = self.parse_func()?;
    let loc = start.loc + func.loc;
    Ok(Node::new(loc, FunctionDeclStmt { name, func }).wrap(Stmt::FunctionDecl))
  }

  fn parse_stmt_if(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordIf)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr(1, false)?;
    self.require(TT::ParenthesisClose)?;
    let consequent = self.parse_stmt()?;
    let mut loc = start.loc + consequent.loc;
    let alternate = if self.consume_if(TT::KeywordElse)?.is_some() {
      let alternate = self.parse_stmt()?;
      loc += alternate.loc;
      Some(alternate)
    } else {
      None
    };
    Ok(
      Node::new(loc, IfStmt {
        test,
        consequent,
        alternate,
      })
      .wrap(Stmt::If),
    )
  }

  fn parse_stmt_label(&mut self) -> SyntaxResult<Node<Stmt>> {
    let name_tok = self.require(TT::Identifier)?;
    self.require(TT::Colon)?;
    let statement = self.parse_stmt()?;
    let loc = name_tok.loc + statement.loc;
    Ok(
      Node::new(loc, LabelStmt {
        name: self.string(name_tok.loc),
        statement,
      })
      .wrap(Stmt::Label),
    )
  }

  fn parse_stmt_return(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordReturn)?;
    let mut loc = start.loc;
    let next = self.peek()?;
    let value = match next.typ {
      TT::Semicolon | TT::BraceClose | TT::EOF => None,
      _ if next.after_line_terminator => None,
      _ => {
        let value = self.parse_expr(1, false)?;
        loc += value.loc;
        Some(value)
      }
    };
    self.semicolon()?;
    Ok(Node::new(loc, ReturnStmt { value }).wrap(Stmt::Return))
  }

  fn parse_stmt_switch(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordSwitch)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr(1, false)?;
    self.require(TT::ParenthesisClose)?;
    self.require(TT::BraceOpen)?;
    let mut branches = Vec::new();
    while self.peek()?.typ != TT::BraceClose {
      let t = self.consume()?;
      let case = match t.typ {
        TT::KeywordCase => Some(self.parse_expr(1, false)?),
        TT::KeywordDefault => None,
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("case or default"))),
      };
      self.require(TT::Colon)?;
      let mut body = Vec::new();
      loop {
        match self.peek()?.typ {
          TT::KeywordCase | TT::KeywordDefault | TT::BraceClose => break,
          _ => body.push(self.parse_stmt()?),
        };
      }
      let mut loc = t.loc;
      if let Some(last) = body.last() {
        loc += last.loc;
      };
      branches.push(Node::new(loc, SwitchBranch { case, body }));
    }
    let close = self.require(TT::BraceClose)?;
    Ok(Node::new(start.loc + close.loc, SwitchStmt { test, branches }).wrap(Stmt::Switch))
  }

  fn parse_stmt_throw(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordThrow)?;
    if self.peek()?.after_line_terminator {
      return Err(
        start
          .loc
          .error(SyntaxErrorType::LineTerminatorAfterThrow, None),
      );
    }
    let value = self.parse_expr(1, false)?;
    let loc = start.loc + value.loc;
    self.semicolon()?;
    Ok(Node::new(loc, ThrowStmt { value }).wrap(Stmt::Throw))
  }

  fn parse_block_body(&mut self) -> SyntaxResult<(Vec<Node<Stmt>>, Loc)> {
    let start = self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    while self.peek()?.typ != TT::BraceClose {
      body.push(self.parse_stmt()?);
    }
    let close = self.require(TT::BraceClose)?;
    Ok((body, start.loc + close.loc))
  }

  fn parse_stmt_try(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordTry)?;
    let (wrapped, mut loc) = self.parse_block_body()?;
    loc += start.loc;
    let catch = if self.consume_if(TT::KeywordCatch)?.is_some() {
      self.require(TT::ParenthesisOpen)?;
      let parameter = self.parse_id_pat()?;
      self.require(TT::ParenthesisClose)?;
      let (body, catch_loc) = self.parse_block_body()?;
      loc += catch_loc;
      Some(Node::new(catch_loc, CatchBlock { parameter, body }))
    } else {
      None
    };
    let finally = if self.consume_if(TT::KeywordFinally)?.is_some() {
      let (body, finally_loc) = self.parse_block_body()?;
      loc += finally_loc;
      Some(body)
    } else {
      None
    };
    if catch.is_none() && finally.is_none() {
      return Err(
        loc.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally, None),
      );
    }
    Ok(
      Node::new(loc, TryStmt {
        wrapped,
        catch,
        finally,
      })
      .wrap(Stmt::Try),
    )
  }

  /// Parses `var` and its declarators without the trailing semicolon, so
  /// `for` heads can reuse it.
  fn parse_var_decl(&mut self, no_in: bool) -> SyntaxResult<Node<VarDeclStmt>> {
    let start = self.require(TT::KeywordVar)?;
    let mut loc = start.loc;
    let mut declarators = Vec::new();
    loop {
      let name = self.parse_id_pat()?;
      let mut decl_loc = name.loc;
      let initializer = if self.consume_if(TT::Equals)?.is_some() {
        let value = self.parse_expr(ASSIGNMENT_PRECEDENCE, no_in)?;
        decl_loc += value.loc;
        Some(value)
      } else {
        None
      };
      loc += decl_loc;
      declarators.push(Node::new(decl_loc, VarDeclarator { name, initializer }));
      if self.consume_if(TT::Comma)?.is_none() {
        break;
      }
    }
    Ok(Node::new(loc, VarDeclStmt { declarators }))
  }

  fn parse_stmt_while(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let condition = self.parse_expr(1, false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start.loc + body.loc;
    Ok(Node::new(loc, WhileStmt { condition, body }).wrap(Stmt::While))
  }

  fn parse_stmt_expr(&mut self) -> SyntaxResult<Node<Stmt>> {
    let expr = self.parse_expr(1, false)?;
    self.semicolon()?;
    let loc = expr.loc;
    Ok(Node::new(loc, ExprStmt { expr }).wrap(Stmt::Expr))
  }
}
