use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// The only binding pattern in ES5: a plain identifier.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}
