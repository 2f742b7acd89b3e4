use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::expr::Expr;
use super::node::Node;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjKey {
  #[drive(skip)]
  Ident(String),
  #[drive(skip)]
  Num(JsNumber),
  #[drive(skip)]
  Str(String),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub key: ObjKey,
  pub value: Node<Expr>,
}
