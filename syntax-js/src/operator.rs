use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

/// Precedence of the conditional (ternary) operator; it has no entry in
/// `OPERATORS` as it is not a binary operator node.
pub const COND_PRECEDENCE: u8 = 3;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let ops = [
    (Comma, 1, Left),

    (Assignment, 2, Right),
    (AssignmentAddition, 2, Right),
    (AssignmentBitwiseAnd, 2, Right),
    (AssignmentBitwiseLeftShift, 2, Right),
    (AssignmentBitwiseOr, 2, Right),
    (AssignmentBitwiseRightShift, 2, Right),
    (AssignmentBitwiseUnsignedRightShift, 2, Right),
    (AssignmentBitwiseXor, 2, Right),
    (AssignmentDivision, 2, Right),
    (AssignmentMultiplication, 2, Right),
    (AssignmentRemainder, 2, Right),
    (AssignmentSubtraction, 2, Right),

    (LogicalOr, 4, Left),
    (LogicalAnd, 5, Left),
    (BitwiseOr, 6, Left),
    (BitwiseXor, 7, Left),
    (BitwiseAnd, 8, Left),

    (Equality, 9, Left),
    (Inequality, 9, Left),
    (StrictEquality, 9, Left),
    (StrictInequality, 9, Left),

    (GreaterThan, 10, Left),
    (GreaterThanOrEqual, 10, Left),
    (In, 10, Left),
    (Instanceof, 10, Left),
    (LessThan, 10, Left),
    (LessThanOrEqual, 10, Left),

    (BitwiseLeftShift, 11, Left),
    (BitwiseRightShift, 11, Left),
    (BitwiseUnsignedRightShift, 11, Left),

    (Addition, 12, Left),
    (Subtraction, 12, Left),

    (Division, 13, Left),
    (Multiplication, 13, Left),
    (Remainder, 13, Left),

    (BitwiseNot, 14, Right),
    (Delete, 14, Right),
    (LogicalNot, 14, Right),
    (PrefixDecrement, 14, Right),
    (PrefixIncrement, 14, Right),
    (Typeof, 14, Right),
    (UnaryNegation, 14, Right),
    (UnaryPlus, 14, Right),
    (Void, 14, Right),

    (PostfixDecrement, 15, Left),
    (PostfixIncrement, 15, Left),
  ];
  let mut map = HashMap::<OperatorName, Operator>::new();
  for (name, precedence, associativity) in ops {
    map.insert(name, Operator {
      name,
      precedence,
      associativity,
    });
  }
  map
});
