use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::node::Node;
use super::stmt::Stmt;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
