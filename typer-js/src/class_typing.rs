use crate::ir::Variable;
use types_js::Signature;
use types_js::Type;

/// Shape information accumulated across one open class definition.
///
/// Instance and static shapes grow member by member; the externally visible
/// class value is only assembled when the definition closes. Inherited
/// members are not copied into either shape: `super.*` accesses resolve
/// against the parent types tracked here instead.
#[derive(Debug)]
pub(crate) struct ClassTyping {
  pub class_var: Variable,
  pub instance: Type,
  pub statics: Type,
  pub constructor_signature: Option<Signature>,
  pub super_type: Option<Type>,
  pub super_constructor_type: Option<Type>,
}

impl ClassTyping {
  pub fn new(class_var: Variable, superclass: Option<Type>) -> ClassTyping {
    let (super_type, super_constructor_type) = match superclass {
      Some(superclass) => {
        let parent_instance = superclass
          .construct_signature()
          .map(|sig| sig.ret.clone())
          .unwrap_or_else(Type::object);
        (Some(parent_instance), Some(superclass))
      }
      None => (None, None),
    };
    ClassTyping {
      class_var,
      instance: Type::object(),
      statics: Type::object(),
      constructor_signature: None,
      super_type,
      super_constructor_type,
    }
  }

  /// The class value: the static shape merged with a construct signature
  /// returning the instance shape. Without an explicit constructor the
  /// class constructs with zero parameters.
  pub fn class_value(&self) -> Type {
    let params = self
      .constructor_signature
      .as_ref()
      .map(|sig| sig.params.clone())
      .unwrap_or_default();
    self.statics.clone() + Type::constructor(Signature::new(params, self.instance.clone()))
  }
}
