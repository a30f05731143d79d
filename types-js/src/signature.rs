use crate::types::Type;
use serde::Deserialize;
use serde::Serialize;

/// One declared parameter of a function signature.
///
/// `optional` parameters bind callee-side as `T ∪ undefined`; a trailing
/// `rest` parameter matches zero or more arguments and binds callee-side as
/// an array-like object rather than `T` itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
  pub ty: Type,
  pub optional: bool,
  pub rest: bool,
}

impl Param {
  pub fn plain(ty: Type) -> Param {
    Param {
      ty,
      optional: false,
      rest: false,
    }
  }

  pub fn opt(ty: Type) -> Param {
    Param {
      ty,
      optional: true,
      rest: false,
    }
  }

  pub fn rest(ty: Type) -> Param {
    Param {
      ty,
      optional: false,
      rest: true,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
  pub params: Vec<Param>,
  pub ret: Type,
}

impl Signature {
  pub fn new(params: Vec<Param>, ret: Type) -> Signature {
    Signature { params, ret }
  }

  /// The `[] => T` shorthand.
  pub fn returning(ret: Type) -> Signature {
    Signature {
      params: Vec::new(),
      ret,
    }
  }

  pub fn required_params(&self) -> usize {
    self
      .params
      .iter()
      .filter(|p| !p.optional && !p.rest)
      .count()
  }
}
