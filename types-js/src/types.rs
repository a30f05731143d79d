use crate::signature::Signature;
use bitflags::bitflags;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Add;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::Sub;
use std::sync::Arc;

bitflags! {
  /// The disjoint primitive atoms of the lattice.
  ///
  /// `UNKNOWN` is the "no information" marker: it is carried through unions
  /// bitwise and is part of [`Type::anything`] so that `unknown ⊆ anything`
  /// holds, but it overlaps with nothing else.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
  pub struct TypeBits: u16 {
    const UNDEFINED = 1 << 0;
    const NULL = 1 << 1;
    const BOOLEAN = 1 << 2;
    const INTEGER = 1 << 3;
    const FLOAT = 1 << 4;
    const STRING = 1 << 5;
    const BIGINT = 1 << 6;
    const REGEXP = 1 << 7;
    const ITERABLE = 1 << 8;
    const UNKNOWN = 1 << 9;
  }
}

impl TypeBits {
  pub const NUMBER: TypeBits = TypeBits::INTEGER.union(TypeBits::FLOAT);
  pub const PRIMITIVE: TypeBits = TypeBits::UNDEFINED
    .union(TypeBits::NULL)
    .union(TypeBits::BOOLEAN)
    .union(TypeBits::INTEGER)
    .union(TypeBits::FLOAT)
    .union(TypeBits::STRING);
}

mod type_bits_serde {
  use super::TypeBits;
  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serializer;

  pub fn serialize<S: Serializer>(bits: &TypeBits, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(bits.bits())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TypeBits, D::Error> {
    u16::deserialize(deserializer).map(TypeBits::from_bits_truncate)
  }
}

/// Structural description of the object component of a union: the named
/// properties and methods a value is known to carry, an optional nominal
/// group tag (e.g. "Array"), and optional call/construct signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectShape {
  pub group: Option<String>,
  pub properties: BTreeSet<String>,
  pub methods: BTreeSet<String>,
  pub call_signature: Option<Signature>,
  pub construct_signature: Option<Signature>,
}

impl ObjectShape {
  /// True if every value described by `inner` is also described by `self`,
  /// i.e. `self` constrains no more than `inner` does.
  fn covers(&self, inner: &ObjectShape) -> bool {
    self.properties.is_subset(&inner.properties)
      && self.methods.is_subset(&inner.methods)
      && match &self.group {
        Some(group) => inner.group.as_ref() == Some(group),
        None => true,
      }
      && match &self.call_signature {
        Some(sig) => inner.call_signature.as_ref() == Some(sig),
        None => true,
      }
      && match &self.construct_signature {
        Some(sig) => inner.construct_signature.as_ref() == Some(sig),
        None => true,
      }
  }

  /// Structural meet for unions: keep only what both sides guarantee.
  fn join_union(&self, other: &ObjectShape) -> ObjectShape {
    ObjectShape {
      group: eq_or_drop(&self.group, &other.group),
      properties: self.properties.intersection(&other.properties).cloned().collect(),
      methods: self.methods.intersection(&other.methods).cloned().collect(),
      call_signature: eq_or_drop(&self.call_signature, &other.call_signature),
      construct_signature: eq_or_drop(&self.construct_signature, &other.construct_signature),
    }
  }

  /// Constraint accumulation for `merging`: keep what either side knows.
  fn join_merge(&self, other: &ObjectShape) -> ObjectShape {
    ObjectShape {
      group: self.group.clone().or_else(|| other.group.clone()),
      properties: self.properties.union(&other.properties).cloned().collect(),
      methods: self.methods.union(&other.methods).cloned().collect(),
      call_signature: self
        .call_signature
        .clone()
        .or_else(|| other.call_signature.clone()),
      construct_signature: self
        .construct_signature
        .clone()
        .or_else(|| other.construct_signature.clone()),
    }
  }

  fn join_intersect(&self, other: &ObjectShape) -> ObjectShape {
    ObjectShape {
      group: eq_or_drop(&self.group, &other.group),
      properties: self.properties.union(&other.properties).cloned().collect(),
      methods: self.methods.union(&other.methods).cloned().collect(),
      call_signature: eq_or_drop(&self.call_signature, &other.call_signature),
      construct_signature: eq_or_drop(&self.construct_signature, &other.construct_signature),
    }
  }
}

fn eq_or_drop<T: Clone + PartialEq>(a: &Option<T>, b: &Option<T>) -> Option<T> {
  if a == b {
    a.clone()
  } else {
    None
  }
}

/// A JavaScript type: a union of primitive atoms plus at most one object
/// shape describing the object component of the union.
///
/// Values are immutable plain data with value equality; the shape is shared
/// behind an `Arc` purely to make clones cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
  #[serde(with = "type_bits_serde")]
  bits: TypeBits,
  shape: Option<Arc<ObjectShape>>,
}

impl Type {
  fn from_bits(bits: TypeBits) -> Type {
    Type { bits, shape: None }
  }

  pub fn nothing() -> Type {
    Type::from_bits(TypeBits::empty())
  }

  pub fn undefined() -> Type {
    Type::from_bits(TypeBits::UNDEFINED)
  }

  pub fn null() -> Type {
    Type::from_bits(TypeBits::NULL)
  }

  pub fn boolean() -> Type {
    Type::from_bits(TypeBits::BOOLEAN)
  }

  pub fn integer() -> Type {
    Type::from_bits(TypeBits::INTEGER)
  }

  pub fn float() -> Type {
    Type::from_bits(TypeBits::FLOAT)
  }

  pub fn number() -> Type {
    Type::from_bits(TypeBits::NUMBER)
  }

  pub fn string() -> Type {
    Type::from_bits(TypeBits::STRING)
  }

  pub fn bigint() -> Type {
    Type::from_bits(TypeBits::BIGINT)
  }

  pub fn regexp() -> Type {
    Type::from_bits(TypeBits::REGEXP)
  }

  pub fn iterable() -> Type {
    Type::from_bits(TypeBits::ITERABLE)
  }

  pub fn primitive() -> Type {
    Type::from_bits(TypeBits::PRIMITIVE)
  }

  pub fn unknown() -> Type {
    Type::from_bits(TypeBits::UNKNOWN)
  }

  /// Top of the lattice: every atom plus an unconstrained object shape.
  pub fn anything() -> Type {
    Type {
      bits: TypeBits::all(),
      shape: Some(Arc::new(ObjectShape::default())),
    }
  }

  pub fn object() -> Type {
    Type::from_shape(ObjectShape::default())
  }

  pub fn object_with(properties: &[&str], methods: &[&str]) -> Type {
    Type::from_shape(ObjectShape {
      properties: properties.iter().map(|p| p.to_string()).collect(),
      methods: methods.iter().map(|m| m.to_string()).collect(),
      ..ObjectShape::default()
    })
  }

  pub fn object_of_group(group: &str, properties: &[&str], methods: &[&str]) -> Type {
    Type::object_with(properties, methods).with_group(group)
  }

  pub fn from_shape(shape: ObjectShape) -> Type {
    Type {
      bits: TypeBits::empty(),
      shape: Some(Arc::new(shape)),
    }
  }

  /// Callable-as-function object.
  pub fn function(signature: Signature) -> Type {
    Type::from_shape(ObjectShape {
      call_signature: Some(signature),
      ..ObjectShape::default()
    })
  }

  /// Callable-with-`new` object.
  pub fn constructor(signature: Signature) -> Type {
    Type::from_shape(ObjectShape {
      construct_signature: Some(signature),
      ..ObjectShape::default()
    })
  }

  pub fn function_and_constructor(signature: Signature) -> Type {
    Type::from_shape(ObjectShape {
      call_signature: Some(signature.clone()),
      construct_signature: Some(signature),
      ..ObjectShape::default()
    })
  }

  pub fn bits(&self) -> TypeBits {
    self.bits
  }

  pub fn shape(&self) -> Option<&ObjectShape> {
    self.shape.as_deref()
  }

  pub fn group(&self) -> Option<&str> {
    self.shape()?.group.as_deref()
  }

  pub fn call_signature(&self) -> Option<&Signature> {
    self.shape()?.call_signature.as_ref()
  }

  pub fn construct_signature(&self) -> Option<&Signature> {
    self.shape()?.construct_signature.as_ref()
  }

  pub fn has_property(&self, name: &str) -> bool {
    self.shape().is_some_and(|s| s.properties.contains(name))
  }

  pub fn has_method(&self, name: &str) -> bool {
    self.shape().is_some_and(|s| s.methods.contains(name))
  }

  pub fn is_nothing(&self) -> bool {
    self.bits.is_empty() && self.shape.is_none()
  }

  /// Exactly the "no information" value, not merely a union containing it.
  pub fn is_unknown(&self) -> bool {
    self.bits == TypeBits::UNKNOWN && self.shape.is_none()
  }

  fn map_shape(&self, f: impl FnOnce(&mut ObjectShape)) -> Type {
    let mut shape = self.shape.as_deref().cloned().unwrap_or_default();
    f(&mut shape);
    Type {
      bits: self.bits,
      shape: Some(Arc::new(shape)),
    }
  }

  pub fn adding_property(&self, name: &str) -> Type {
    self.map_shape(|shape| {
      shape.properties.insert(name.to_string());
    })
  }

  pub fn removing_property(&self, name: &str) -> Type {
    self.map_shape(|shape| {
      shape.properties.remove(name);
    })
  }

  pub fn adding_method(&self, name: &str) -> Type {
    self.map_shape(|shape| {
      shape.methods.insert(name.to_string());
    })
  }

  pub fn with_group(&self, group: &str) -> Type {
    self.map_shape(|shape| {
      shape.group = Some(group.to_string());
    })
  }

  /// Lattice join. Object shapes meet structurally: a value of the union
  /// behaves like either operand, so only shared constraints survive.
  pub fn union(&self, other: &Type) -> Type {
    let shape = match (self.shape(), other.shape()) {
      (Some(a), Some(b)) => Some(Arc::new(a.join_union(b))),
      (Some(_), None) => self.shape.clone(),
      (None, Some(_)) => other.shape.clone(),
      (None, None) => None,
    };
    Type {
      bits: self.bits | other.bits,
      shape,
    }
  }

  /// Constraint accumulation: the result carries what either side knows.
  /// This is how composite values are built up (`constructor(sig) +
  /// object_with(statics)` keeps both the signature and the statics).
  pub fn merging(&self, other: &Type) -> Type {
    let shape = match (self.shape(), other.shape()) {
      (Some(a), Some(b)) => Some(Arc::new(a.join_merge(b))),
      (Some(_), None) => self.shape.clone(),
      (None, Some(_)) => other.shape.clone(),
      (None, None) => None,
    };
    Type {
      bits: self.bits | other.bits,
      shape,
    }
  }

  pub fn intersect(&self, other: &Type) -> Type {
    let shape = match (self.shape(), other.shape()) {
      (Some(a), Some(b)) => Some(Arc::new(a.join_intersect(b))),
      _ => None,
    };
    Type {
      bits: self.bits & other.bits,
      shape,
    }
  }

  /// Removes the atoms of `other`, and the object component when `other`'s
  /// shape covers it (describes the same or a wider set of objects).
  pub fn subtract(&self, other: &Type) -> Type {
    let shape = match (self.shape(), other.shape()) {
      (Some(a), Some(b)) if b.covers(a) => None,
      _ => self.shape.clone(),
    };
    Type {
      bits: self.bits - other.bits,
      shape,
    }
  }

  /// Subtype test: every value of `self` is a value of `other`.
  pub fn is(&self, other: &Type) -> bool {
    if !other.bits.contains(self.bits) {
      return false;
    }
    match (self.shape(), other.shape()) {
      (None, _) => true,
      (Some(_), None) => false,
      (Some(a), Some(b)) => b.covers(a),
    }
  }

  /// Overlap test: `self` and `other` share at least one value.
  pub fn may_be(&self, other: &Type) -> bool {
    !self.intersect(other).is_nothing()
  }
}

impl Add for Type {
  type Output = Type;

  fn add(self, rhs: Type) -> Type {
    self.merging(&rhs)
  }
}

impl BitOr for Type {
  type Output = Type;

  fn bitor(self, rhs: Type) -> Type {
    self.union(&rhs)
  }
}

impl BitAnd for Type {
  type Output = Type;

  fn bitand(self, rhs: Type) -> Type {
    self.intersect(&rhs)
  }
}

impl Sub for Type {
  type Output = Type;

  fn sub(self, rhs: Type) -> Type {
    self.subtract(&rhs)
  }
}
