use types_js::Type;

/// Shape accumulated across one open object literal. Integer-indexed
/// elements deliberately leave no trace in the shape.
#[derive(Debug)]
pub(crate) struct ObjectLiteralTyping {
  pub ty: Type,
}

impl ObjectLiteralTyping {
  pub fn new() -> ObjectLiteralTyping {
    ObjectLiteralTyping { ty: Type::object() }
  }
}
