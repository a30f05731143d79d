use types_js::Param;
use types_js::Signature;
use types_js::Type;

#[test]
fn primitive_subtyping_table() {
  assert!(Type::integer().is(&Type::number()));
  assert!(Type::float().is(&Type::number()));
  assert!(!Type::number().is(&Type::integer()));
  assert!(Type::undefined().is(&Type::primitive()));
  assert!(Type::null().is(&Type::primitive()));
  assert!(Type::string().is(&Type::primitive()));
  assert!(!Type::regexp().is(&Type::primitive()));
  assert!(!Type::iterable().is(&Type::primitive()));
}

#[test]
fn overlap_table() {
  assert!(Type::number().may_be(&Type::integer()));
  assert!(!Type::string().may_be(&Type::integer()));
  assert!(!Type::object().may_be(&Type::string()));
  assert!(Type::object().may_be(&Type::anything()));
  assert!(!Type::nothing().may_be(&Type::anything()));
}

#[test]
fn callables_relate_through_their_signatures() {
  let sig = Signature::new(vec![Param::plain(Type::integer())], Type::string());
  let other = Signature::returning(Type::string());

  let f = Type::function(sig.clone());
  assert!(f.is(&Type::object()));
  assert!(f.is(&Type::function(sig.clone())));
  assert!(!f.is(&Type::function(other.clone())));
  assert!(!Type::object().is(&f));

  let both = Type::function_and_constructor(sig.clone());
  assert!(both.is(&Type::function(sig.clone())));
  assert!(both.is(&Type::constructor(sig.clone())));
  assert!(!Type::function(sig.clone()).is(&both));
}

#[test]
fn class_values_expose_statics_and_construct_signature() {
  let instance = Type::object_with(&["a", "b"], &["f"]);
  let ctor = Signature::new(vec![Param::plain(Type::string())], instance.clone());
  let class = Type::object_with(&["version"], &["create"]) + Type::constructor(ctor.clone());

  assert!(class.has_property("version"));
  assert!(class.has_method("create"));
  assert_eq!(class.construct_signature(), Some(&ctor));
  assert!(class.is(&Type::constructor(ctor)));
  assert!(class.is(&Type::object_with(&["version"], &[])));
}

#[test]
fn groups_are_nominal_bounds() {
  let array = Type::object_of_group("Array", &["length"], &["push"]);
  assert!(array.is(&Type::object_of_group("Array", &[], &[])));
  assert!(!array.is(&Type::object_of_group("Map", &[], &[])));
  // An ungrouped bound accepts any group; a grouped bound rejects ungrouped
  // subjects.
  assert!(array.is(&Type::object()));
  assert!(!Type::object().is(&Type::object_of_group("Array", &[], &[])));
}

#[test]
fn union_then_query_weakens_soundly() {
  let obj = Type::object_with(&["x"], &[]);
  let merged = obj.clone() | Type::string();
  assert!(obj.is(&merged));
  assert!(Type::string().is(&merged));
  assert!(merged.may_be(&Type::object()));
  assert!(merged.may_be(&Type::string()));
  assert!(!merged.is(&Type::object()));
  assert!(!merged.is(&Type::string()));
}
