use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr;
use once_cell::sync::Lazy;

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
    }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn byte(&self, i: usize) -> u8 {
    self.source.as_bytes().get(i).copied().unwrap_or(0)
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, loc: Loc) -> &str {
    &self.source[loc.0..loc.1]
  }
}

static KEYWORDS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, TT>::new();
  map.insert("break", TT::KeywordBreak);
  map.insert("case", TT::KeywordCase);
  map.insert("catch", TT::KeywordCatch);
  map.insert("continue", TT::KeywordContinue);
  map.insert("debugger", TT::KeywordDebugger);
  map.insert("default", TT::KeywordDefault);
  map.insert("delete", TT::KeywordDelete);
  map.insert("do", TT::KeywordDo);
  map.insert("else", TT::KeywordElse);
  map.insert("false", TT::LiteralFalse);
  map.insert("finally", TT::KeywordFinally);
  map.insert("for", TT::KeywordFor);
  map.insert("function", TT::KeywordFunction);
  map.insert("if", TT::KeywordIf);
  map.insert("in", TT::KeywordIn);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("new", TT::KeywordNew);
  map.insert("null", TT::LiteralNull);
  map.insert("return", TT::KeywordReturn);
  map.insert("switch", TT::KeywordSwitch);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordThrow);
  map.insert("true", TT::LiteralTrue);
  map.insert("try", TT::KeywordTry);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("var", TT::KeywordVar);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordWhile);
  map.insert("with", TT::KeywordWith);
  map
});

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
}

impl PatternMatcher {
  fn new(patterns: Vec<(TT, &'static str)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(StartKind::Anchored)
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(syns)
      .unwrap();
    PatternMatcher {
      patterns: tts,
      matcher,
    }
  }

  fn find(&self, haystack: &str) -> Option<(TT, usize)> {
    self
      .matcher
      .find(Input::new(haystack).anchored(Anchored::Yes))
      .map(|m| (self.patterns[m.pattern().as_usize()], m.end()))
  }
}

#[rustfmt::skip]
static PUNCTUATORS: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new(vec![
    (TT::Ampersand, "&"),
    (TT::AmpersandAmpersand, "&&"),
    (TT::AmpersandEquals, "&="),
    (TT::Asterisk, "*"),
    (TT::AsteriskEquals, "*="),
    (TT::Bar, "|"),
    (TT::BarBar, "||"),
    (TT::BarEquals, "|="),
    (TT::BraceClose, "}"),
    (TT::BraceOpen, "{"),
    (TT::BracketClose, "]"),
    (TT::BracketOpen, "["),
    (TT::Caret, "^"),
    (TT::CaretEquals, "^="),
    (TT::ChevronLeft, "<"),
    (TT::ChevronLeftChevronLeft, "<<"),
    (TT::ChevronLeftChevronLeftEquals, "<<="),
    (TT::ChevronLeftEquals, "<="),
    (TT::ChevronRight, ">"),
    (TT::ChevronRightChevronRight, ">>"),
    (TT::ChevronRightChevronRightChevronRight, ">>>"),
    (TT::ChevronRightChevronRightChevronRightEquals, ">>>="),
    (TT::ChevronRightChevronRightEquals, ">>="),
    (TT::ChevronRightEquals, ">="),
    (TT::Colon, ":"),
    (TT::Comma, ","),
    (TT::Dot, "."),
    (TT::Equals, "="),
    (TT::EqualsEquals, "=="),
    (TT::EqualsEqualsEquals, "==="),
    (TT::Exclamation, "!"),
    (TT::ExclamationEquals, "!="),
    (TT::ExclamationEqualsEquals, "!=="),
    (TT::Hyphen, "-"),
    (TT::HyphenEquals, "-="),
    (TT::HyphenHyphen, "--"),
    (TT::ParenthesisClose, ")"),
    (TT::ParenthesisOpen, "("),
    (TT::Percent, "%"),
    (TT::PercentEquals, "%="),
    (TT::Plus, "+"),
    (TT::PlusEquals, "+="),
    (TT::PlusPlus, "++"),
    (TT::Question, "?"),
    (TT::Semicolon, ";"),
    (TT::Slash, "/"),
    (TT::SlashEquals, "/="),
    (TT::Tilde, "~"),
  ])
});

fn is_id_start(b: u8) -> bool {
  b == b'_' || b == b'$' || b.is_ascii_alphabetic() || b >= 0x80
}

fn is_id_continue(b: u8) -> bool {
  is_id_start(b) || b.is_ascii_digit()
}

/// Lexes the next token, skipping any leading whitespace and comments.
pub fn lex_next(lexer: &mut Lexer, mode: LexMode) -> SyntaxResult<Token> {
  let mut after_line_terminator = false;
  loop {
    while !lexer.at_end() {
      match lexer.byte(lexer.next) {
        b'\n' | b'\r' => {
          after_line_terminator = true;
          lexer.next += 1;
        }
        b' ' | b'\t' | 0x0b | 0x0c => lexer.next += 1,
        _ => break,
      }
    }
    if lexer.at_end() {
      return Ok(Token {
        loc: lexer.eof_range(),
        typ: TT::EOF,
        after_line_terminator,
      });
    }
    if lexer.byte(lexer.next) == b'/' {
      match lexer.byte(lexer.next + 1) {
        b'/' => {
          let rest = &lexer.source.as_bytes()[lexer.next..];
          match memchr(b'\n', rest) {
            Some(i) => lexer.next += i,
            None => lexer.next = lexer.end(),
          };
          continue;
        }
        b'*' => {
          let start = lexer.next;
          match lexer.source[start + 2..].find("*/") {
            Some(i) => {
              let end = start + 2 + i + 2;
              if lexer.source[start..end].contains('\n') {
                after_line_terminator = true;
              }
              lexer.next = end;
            }
            None => return Err(Loc(start, lexer.end()).error(SyntaxErrorType::UnexpectedEnd, None)),
          };
          continue;
        }
        _ => {}
      }
    }
    break;
  }

  let start = lexer.next;
  let b = lexer.byte(start);

  if is_id_start(b) {
    let mut end = start + 1;
    while end < lexer.end() && is_id_continue(lexer.byte(end)) {
      end += 1;
    }
    lexer.next = end;
    let typ = KEYWORDS
      .get(&lexer.source[start..end])
      .copied()
      .unwrap_or(TT::Identifier);
    return Ok(Token {
      loc: Loc(start, end),
      typ,
      after_line_terminator,
    });
  }

  if b.is_ascii_digit() || (b == b'.' && lexer.byte(start + 1).is_ascii_digit()) {
    return lex_number(lexer, start, after_line_terminator);
  }

  if b == b'\'' || b == b'"' {
    return lex_string(lexer, start, after_line_terminator);
  }

  if mode == LexMode::SlashIsRegex && b == b'/' {
    return lex_regex(lexer, start, after_line_terminator);
  }

  match PUNCTUATORS.find(&lexer.source[start..]) {
    Some((typ, len)) => {
      lexer.next = start + len;
      Ok(Token {
        loc: Loc(start, start + len),
        typ,
        after_line_terminator,
      })
    }
    None => Err(Loc(start, start + 1).error(SyntaxErrorType::ExpectedSyntax("token"), None)),
  }
}

fn lex_number(lexer: &mut Lexer, start: usize, after_line_terminator: bool) -> SyntaxResult<Token> {
  let mut i = start;
  if lexer.byte(i) == b'0' && matches!(lexer.byte(i + 1), b'x' | b'X') {
    i += 2;
    let digits = i;
    while lexer.byte(i).is_ascii_hexdigit() {
      i += 1;
    }
    if i == digits {
      return Err(Loc(start, i).error(SyntaxErrorType::MalformedLiteralNumber, None));
    }
  } else {
    while lexer.byte(i).is_ascii_digit() {
      i += 1;
    }
    if lexer.byte(i) == b'.' {
      i += 1;
      while lexer.byte(i).is_ascii_digit() {
        i += 1;
      }
    }
    if matches!(lexer.byte(i), b'e' | b'E') {
      i += 1;
      if matches!(lexer.byte(i), b'+' | b'-') {
        i += 1;
      }
      let digits = i;
      while lexer.byte(i).is_ascii_digit() {
        i += 1;
      }
      if i == digits {
        return Err(Loc(start, i).error(SyntaxErrorType::MalformedLiteralNumber, None));
      }
    }
  }
  if i < lexer.end() && is_id_start(lexer.byte(i)) {
    return Err(Loc(start, i + 1).error(SyntaxErrorType::MalformedLiteralNumber, None));
  }
  lexer.next = i;
  Ok(Token {
    loc: Loc(start, i),
    typ: TT::LiteralNumber,
    after_line_terminator,
  })
}

fn lex_string(lexer: &mut Lexer, start: usize, after_line_terminator: bool) -> SyntaxResult<Token> {
  let quote = lexer.byte(start);
  let mut i = start + 1;
  loop {
    if i >= lexer.end() {
      return Err(Loc(start, i).error(SyntaxErrorType::UnexpectedEnd, None));
    }
    match lexer.byte(i) {
      b'\\' => i += 2,
      b'\n' | b'\r' => {
        return Err(Loc(start, i).error(SyntaxErrorType::LineTerminatorInString, None));
      }
      b if b == quote => {
        i += 1;
        break;
      }
      _ => i += 1,
    }
  }
  lexer.next = i;
  Ok(Token {
    loc: Loc(start, i),
    typ: TT::LiteralString,
    after_line_terminator,
  })
}

fn lex_regex(lexer: &mut Lexer, start: usize, after_line_terminator: bool) -> SyntaxResult<Token> {
  let mut i = start + 1;
  let mut in_class = false;
  loop {
    if i >= lexer.end() {
      return Err(Loc(start, i).error(SyntaxErrorType::UnexpectedEnd, None));
    }
    match lexer.byte(i) {
      b'\\' => i += 2,
      b'\n' | b'\r' => {
        return Err(Loc(start, i).error(SyntaxErrorType::LineTerminatorInRegex, None));
      }
      b'[' => {
        in_class = true;
        i += 1;
      }
      b']' => {
        in_class = false;
        i += 1;
      }
      b'/' if !in_class => {
        i += 1;
        break;
      }
      _ => i += 1,
    }
  }
  while i < lexer.end() && is_id_continue(lexer.byte(i)) {
    i += 1;
  }
  lexer.next = i;
  Ok(Token {
    loc: Loc(start, i),
    typ: TT::LiteralRegex,
    after_line_terminator,
  })
}

/// Decodes the value of a string literal token, including its delimiting
/// quotes. Unknown escapes decode to the escaped character itself.
pub fn decode_str_literal(raw: &str) -> String {
  let mut value = String::with_capacity(raw.len());
  let mut chars = raw[1..raw.len() - 1].chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      value.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => value.push('\n'),
      Some('t') => value.push('\t'),
      Some('r') => value.push('\r'),
      Some('b') => value.push('\u{8}'),
      Some('f') => value.push('\u{c}'),
      Some('v') => value.push('\u{b}'),
      Some('0') => value.push('\0'),
      Some('x') => {
        let hex: String = chars.by_ref().take(2).collect();
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          Some(c) => value.push(c),
          None => value.push_str(&hex),
        };
      }
      Some('u') => {
        let hex: String = chars.by_ref().take(4).collect();
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          Some(c) => value.push(c),
          None => value.push_str(&hex),
        };
      }
      // Line continuation.
      Some('\n') => {}
      Some('\r') => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
      }
      Some(c) => value.push(c),
      None => {}
    };
  }
  value
}

/// Parses the value of a number literal token.
pub fn parse_num_literal(raw: &str) -> Option<f64> {
  if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
    return u64::from_str_radix(hex, 16).ok().map(|v| v as f64);
  }
  let mut normalized = raw.to_string();
  if normalized.starts_with('.') {
    normalized.insert(0, '0');
  }
  if normalized.ends_with('.') {
    normalized.push('0');
  }
  normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tts(source: &str) -> Vec<TT> {
    let mut lexer = Lexer::new(source);
    let mut tts = Vec::new();
    loop {
      let t = lex_next(&mut lexer, LexMode::Standard).unwrap();
      if t.typ == TT::EOF {
        break;
      }
      tts.push(t.typ);
    }
    tts
  }

  #[test]
  fn lexes_basic_tokens() {
    assert_eq!(tts("var a = b.c + 1;"), vec![
      TT::KeywordVar,
      TT::Identifier,
      TT::Equals,
      TT::Identifier,
      TT::Dot,
      TT::Identifier,
      TT::Plus,
      TT::LiteralNumber,
      TT::Semicolon,
    ]);
  }

  #[test]
  fn lexes_longest_punctuator() {
    assert_eq!(tts("a >>>= b === c"), vec![
      TT::Identifier,
      TT::ChevronRightChevronRightChevronRightEquals,
      TT::Identifier,
      TT::EqualsEqualsEquals,
      TT::Identifier,
    ]);
  }

  #[test]
  fn skips_comments() {
    assert_eq!(tts("a // comment\n/* block */ b"), vec![
      TT::Identifier,
      TT::Identifier
    ]);
  }

  #[test]
  fn tracks_line_terminators() {
    let mut lexer = Lexer::new("a\nb c");
    let a = lex_next(&mut lexer, LexMode::Standard).unwrap();
    let b = lex_next(&mut lexer, LexMode::Standard).unwrap();
    let c = lex_next(&mut lexer, LexMode::Standard).unwrap();
    assert!(!a.after_line_terminator);
    assert!(b.after_line_terminator);
    assert!(!c.after_line_terminator);
  }

  #[test]
  fn slash_mode_decides_regex() {
    let mut lexer = Lexer::new("/ab[/]c/gi");
    let t = lex_next(&mut lexer, LexMode::SlashIsRegex).unwrap();
    assert_eq!(t.typ, TT::LiteralRegex);
    assert_eq!(t.loc, Loc(0, 10));

    let mut lexer = Lexer::new("/ a");
    let t = lex_next(&mut lexer, LexMode::Standard).unwrap();
    assert_eq!(t.typ, TT::Slash);
  }

  #[test]
  fn unterminated_string_is_an_error() {
    let mut lexer = Lexer::new("'abc");
    let err = lex_next(&mut lexer, LexMode::Standard).unwrap_err();
    assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
  }

  #[test]
  fn decodes_string_escapes() {
    assert_eq!(decode_str_literal("'a\\nb'"), "a\nb");
    assert_eq!(decode_str_literal("'\\x41\\u0042'"), "AB");
    assert_eq!(decode_str_literal("'\\q'"), "q");
  }

  #[test]
  fn parses_number_literals() {
    assert_eq!(parse_num_literal("0x10"), Some(16.0));
    assert_eq!(parse_num_literal(".5"), Some(0.5));
    assert_eq!(parse_num_literal("1e3"), Some(1000.0));
  }
}
