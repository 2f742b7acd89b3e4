use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A JavaScript number. Stored as an f64; `Display` produces a form that
/// re-lexes to the same value (integers without a fractional part, everything
/// else through Rust's shortest float formatting).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct JsNumber(pub f64);

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let v = self.0;
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
      write!(f, "{}", v as i64)
    } else {
      write!(f, "{}", v)
    }
  }
}
