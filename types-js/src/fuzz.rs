use crate::Param;
use crate::Signature;
use crate::Type;
use crate::TypeBits;

fn type_from(byte: u8) -> Type {
  let base = from_bits_type(TypeBits::from_bits_truncate(byte as u16));
  if byte & 0x80 != 0 {
    base | Type::object_with(&["a", "b"], &["m"])
  } else {
    base
  }
}

fn from_bits_type(bits: TypeBits) -> Type {
  let mut ty = Type::nothing();
  for atom in [
    TypeBits::UNDEFINED,
    TypeBits::NULL,
    TypeBits::BOOLEAN,
    TypeBits::INTEGER,
    TypeBits::FLOAT,
    TypeBits::STRING,
    TypeBits::BIGINT,
  ] {
    if bits.contains(atom) {
      ty = ty.union(&atom_type(atom));
    }
  }
  ty
}

fn atom_type(atom: TypeBits) -> Type {
  match atom {
    TypeBits::UNDEFINED => Type::undefined(),
    TypeBits::NULL => Type::null(),
    TypeBits::BOOLEAN => Type::boolean(),
    TypeBits::INTEGER => Type::integer(),
    TypeBits::FLOAT => Type::float(),
    TypeBits::STRING => Type::string(),
    _ => Type::bigint(),
  }
}

/// Fuzzing entry point: exercises every lattice operator on types decoded
/// from the input and asserts the laws that must hold for any pair.
pub fn fuzz_lattice(data: &[u8]) {
  let mut previous = Type::function(Signature::new(
    vec![Param::rest(Type::anything())],
    Type::unknown(),
  ));
  for &byte in data {
    let ty = type_from(byte);
    let union = ty.union(&previous);
    assert!(ty.is(&union));
    assert!(previous.is(&union));
    assert_eq!(union, previous.union(&ty));
    let _ = ty.intersect(&previous);
    let _ = ty.subtract(&previous);
    let _ = ty.merging(&previous).to_string();
    previous = ty;
  }
}
