use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::node::Node;
use super::pat::IdPat;
use super::stmt::Stmt;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  pub parameters: Vec<Node<IdPat>>,
  pub body: Vec<Node<Stmt>>,
}
