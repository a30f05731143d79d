use crate::types::ObjectShape;
use crate::types::Type;
use crate::types::TypeBits;
use std::fmt;

const ATOM_NAMES: &[(TypeBits, &str)] = &[
  (TypeBits::UNDEFINED, "undefined"),
  (TypeBits::NULL, "null"),
  (TypeBits::BOOLEAN, "boolean"),
  (TypeBits::INTEGER, "integer"),
  (TypeBits::FLOAT, "float"),
  (TypeBits::STRING, "string"),
  (TypeBits::BIGINT, "bigint"),
  (TypeBits::REGEXP, "regexp"),
  (TypeBits::ITERABLE, "iterable"),
  (TypeBits::UNKNOWN, "unknown"),
];

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_nothing() {
      return f.write_str("nothing");
    }
    if *self == Type::anything() {
      return f.write_str("anything");
    }

    let mut parts: Vec<String> = Vec::new();
    let mut bits = self.bits();
    if bits.contains(TypeBits::NUMBER) {
      parts.push("number".to_string());
      bits -= TypeBits::NUMBER;
    }
    for (atom, name) in ATOM_NAMES {
      if bits.contains(*atom) {
        parts.push(name.to_string());
      }
    }
    if let Some(shape) = self.shape() {
      parts.push(shape_description(shape));
    }
    f.write_str(&parts.join(" | "))
  }
}

fn shape_description(shape: &ObjectShape) -> String {
  let mut out = String::from("object(");
  let mut sections: Vec<String> = Vec::new();
  if let Some(group) = &shape.group {
    sections.push(format!("group: {group}"));
  }
  if !shape.properties.is_empty() {
    let names: Vec<&str> = shape.properties.iter().map(String::as_str).collect();
    sections.push(format!("properties: [{}]", names.join(", ")));
  }
  if !shape.methods.is_empty() {
    let names: Vec<&str> = shape.methods.iter().map(String::as_str).collect();
    sections.push(format!("methods: [{}]", names.join(", ")));
  }
  if shape.call_signature.is_some() {
    sections.push("callable".to_string());
  }
  if shape.construct_signature.is_some() {
    sections.push("constructible".to_string());
  }
  out.push_str(&sections.join(", "));
  out.push(')');
  out
}
