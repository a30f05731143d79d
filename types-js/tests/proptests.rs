use proptest::prelude::*;
use types_js::ObjectShape;
use types_js::Param;
use types_js::Signature;
use types_js::Type;
use types_js::TypeBits;

fn type_with_bits(bits: TypeBits) -> Type {
  let atoms: [(TypeBits, Type); 10] = [
    (TypeBits::UNDEFINED, Type::undefined()),
    (TypeBits::NULL, Type::null()),
    (TypeBits::BOOLEAN, Type::boolean()),
    (TypeBits::INTEGER, Type::integer()),
    (TypeBits::FLOAT, Type::float()),
    (TypeBits::STRING, Type::string()),
    (TypeBits::BIGINT, Type::bigint()),
    (TypeBits::REGEXP, Type::regexp()),
    (TypeBits::ITERABLE, Type::iterable()),
    (TypeBits::UNKNOWN, Type::unknown()),
  ];
  let mut ty = Type::nothing();
  for (atom, atom_ty) in atoms {
    if bits.contains(atom) {
      ty = ty.union(&atom_ty);
    }
  }
  ty
}

fn arb_bits() -> impl Strategy<Value = TypeBits> {
  (0u16..(1 << 10)).prop_map(TypeBits::from_bits_truncate)
}

fn arb_leaf() -> impl Strategy<Value = Type> {
  prop_oneof![
    Just(Type::integer()),
    Just(Type::float()),
    Just(Type::string()),
    Just(Type::boolean()),
    Just(Type::undefined()),
    Just(Type::object()),
    Just(Type::unknown()),
  ]
}

fn arb_signature() -> impl Strategy<Value = Signature> {
  (
    prop::collection::vec((arb_leaf(), 0u8..3), 0..3),
    arb_leaf(),
  )
    .prop_map(|(params, ret)| {
      let params = params
        .into_iter()
        .map(|(ty, kind)| match kind {
          0 => Param::plain(ty),
          1 => Param::opt(ty),
          _ => Param::rest(ty),
        })
        .collect();
      Signature::new(params, ret)
    })
}

fn arb_shape() -> impl Strategy<Value = ObjectShape> {
  (
    prop::option::of(prop_oneof![Just("A".to_string()), Just("B".to_string())]),
    prop::collection::btree_set(prop_oneof![Just("p".to_string()), Just("q".to_string()), Just("r".to_string())], 0..3),
    prop::collection::btree_set(prop_oneof![Just("m".to_string()), Just("n".to_string())], 0..2),
    prop::option::of(arb_signature()),
    prop::option::of(arb_signature()),
  )
    .prop_map(
      |(group, properties, methods, call_signature, construct_signature)| ObjectShape {
        group,
        properties,
        methods,
        call_signature,
        construct_signature,
      },
    )
}

fn arb_type() -> impl Strategy<Value = Type> {
  (arb_bits(), prop::option::of(arb_shape())).prop_map(|(bits, shape)| {
    let base = type_with_bits(bits);
    match shape {
      Some(shape) => base.union(&Type::from_shape(shape)),
      None => base,
    }
  })
}

proptest! {
  #[test]
  fn union_is_commutative(a in arb_type(), b in arb_type()) {
    prop_assert_eq!(a.union(&b), b.union(&a));
  }

  #[test]
  fn union_is_idempotent(a in arb_type()) {
    prop_assert_eq!(a.union(&a), a);
  }

  #[test]
  fn union_is_associative(a in arb_type(), b in arb_type(), c in arb_type()) {
    prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
  }

  #[test]
  fn operands_are_subtypes_of_their_union(a in arb_type(), b in arb_type()) {
    let u = a.union(&b);
    prop_assert!(a.is(&u));
    prop_assert!(b.is(&u));
  }

  #[test]
  fn nothing_is_bottom_and_anything_is_top(a in arb_type()) {
    prop_assert!(Type::nothing().is(&a));
    prop_assert!(a.is(&Type::anything()));
    prop_assert_eq!(Type::nothing().union(&a), a);
  }

  #[test]
  fn subtyping_is_reflexive(a in arb_type()) {
    prop_assert!(a.is(&a));
  }

  #[test]
  fn subtyping_is_transitive(a in arb_type(), b in arb_type(), c in arb_type()) {
    if a.is(&b) && b.is(&c) {
      prop_assert!(a.is(&c));
    }
  }

  #[test]
  fn subtyping_is_antisymmetric(a in arb_type(), b in arb_type()) {
    if a.is(&b) && b.is(&a) {
      prop_assert_eq!(a, b);
    }
  }

  #[test]
  fn overlap_is_symmetric(a in arb_type(), b in arb_type()) {
    prop_assert_eq!(a.may_be(&b), b.may_be(&a));
  }

  #[test]
  fn union_absorbs_subtraction(a in arb_type(), b in arb_type()) {
    prop_assert_eq!(a.subtract(&b).union(&a), a.clone());
  }

  #[test]
  fn subtraction_is_idempotent(a in arb_type(), b in arb_type()) {
    let once = a.subtract(&b);
    prop_assert_eq!(once.subtract(&b), once);
  }

  #[test]
  fn merging_keeps_both_sides_members(a in arb_type(), b in arb_type()) {
    let merged = a.merging(&b);
    for side in [&a, &b] {
      if let Some(shape) = side.shape() {
        for prop in shape.properties.iter() {
          prop_assert!(merged.has_property(prop));
        }
        for method in shape.methods.iter() {
          prop_assert!(merged.has_method(method));
        }
      }
    }
  }
}
