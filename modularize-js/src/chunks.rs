use crate::error::ConvertError;
use crate::file::FileUnit;
use crate::synth;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::obj::ObjKey;
use syntax_js::ast::obj::ObjMember;
use syntax_js::ast::stmt::Stmt;
use syntax_js::operator::OperatorName;

/// Folds the collected raw-text chunks into the designated lookup-table file:
/// its body must start with one assignment of an object literal, which gains
/// one string property per chunk, in collection order. No-op when the file is
/// absent from the corpus; an unexpected table shape is fatal.
pub fn merge_chunks(
  files: &mut [FileUnit],
  table_path: &str,
  chunks: &[(String, String)],
) -> Result<(), ConvertError> {
  let Some(file) = files.iter_mut().find(|f| f.path == table_path) else {
    return Ok(());
  };

  let shape_error = || ConvertError::ChunkTable {
    path: table_path.to_string(),
  };

  let Some(first) = file.top.stx.body.first_mut() else {
    return Err(shape_error());
  };
  let Stmt::Expr(stmt) = first.stx.as_mut() else {
    return Err(shape_error());
  };
  let Expr::Binary(assignment) = stmt.stx.expr.stx.as_mut() else {
    return Err(shape_error());
  };
  if assignment.stx.operator != OperatorName::Assignment {
    return Err(shape_error());
  };
  let Expr::LitObj(table) = assignment.stx.right.stx.as_mut() else {
    return Err(shape_error());
  };

  for (name, text) in chunks {
    table.stx.members.push(synth::node(ObjMember {
      key: ObjKey::Str(name.clone()),
      value: synth::str_lit(text),
    }));
  }
  Ok(())
}
