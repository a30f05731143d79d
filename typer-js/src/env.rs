use ahash::AHashMap;
use types_js::Signature;
use types_js::Type;

/// External oracle for everything the engine cannot infer from the IR
/// alone: named builtins, per-group property and method knowledge, and the
/// concrete types produced by literal loads.
///
/// Queries must be pure within a run. When the host mutates its tables,
/// subsequent queries observe the new answers; earlier inferences are not
/// revisited.
///
/// Lookup contract: with `group: Some(_)` implementations consult *only*
/// their per-group table and with `group: None` *only* their program-global
/// table, answering `Type::unknown()` / `None` on a miss. The
/// [`Typer`](crate::Typer) itself chains per-group knowledge, builder
/// declarations, and global knowledge in that order.
pub trait Environment {
  fn type_of_builtin(&self, name: &str) -> Type {
    let _ = name;
    Type::unknown()
  }

  fn type_of_property(&self, name: &str, group: Option<&str>) -> Type {
    let _ = (name, group);
    Type::unknown()
  }

  fn signature_of_method(&self, name: &str, group: Option<&str>) -> Option<Signature> {
    let _ = (name, group);
    None
  }

  fn int_type(&self) -> Type {
    Type::integer()
  }

  fn float_type(&self) -> Type {
    Type::float()
  }

  fn boolean_type(&self) -> Type {
    Type::boolean()
  }

  fn string_type(&self) -> Type {
    Type::string()
  }

  fn bigint_type(&self) -> Type {
    Type::bigint()
  }

  fn regexp_type(&self) -> Type {
    Type::regexp()
  }

  fn array_type(&self) -> Type {
    Type::iterable() | Type::object()
  }
}

/// Configurable types for the literal-producing operations.
#[derive(Clone, Debug)]
pub struct PrimitiveTypes {
  pub int: Type,
  pub float: Type,
  pub boolean: Type,
  pub string: Type,
  pub bigint: Type,
  pub regexp: Type,
  pub array: Type,
}

impl Default for PrimitiveTypes {
  fn default() -> PrimitiveTypes {
    PrimitiveTypes {
      int: Type::integer(),
      float: Type::float(),
      boolean: Type::boolean(),
      string: Type::string(),
      bigint: Type::bigint(),
      regexp: Type::regexp(),
      array: Type::iterable() | Type::object(),
    }
  }
}

/// Table-backed [`Environment`] for tests and simple hosts.
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
  primitives: PrimitiveTypes,
  builtins: AHashMap<String, Type>,
  properties: AHashMap<String, Type>,
  methods: AHashMap<String, Signature>,
  group_properties: AHashMap<String, AHashMap<String, Type>>,
  group_methods: AHashMap<String, AHashMap<String, Signature>>,
}

impl StaticEnvironment {
  pub fn new() -> StaticEnvironment {
    StaticEnvironment::default()
  }

  pub fn with_builtin(mut self, name: &str, ty: Type) -> StaticEnvironment {
    self.builtins.insert(name.to_string(), ty);
    self
  }

  pub fn with_property(mut self, name: &str, ty: Type) -> StaticEnvironment {
    self.properties.insert(name.to_string(), ty);
    self
  }

  pub fn with_method(mut self, name: &str, signature: Signature) -> StaticEnvironment {
    self.methods.insert(name.to_string(), signature);
    self
  }

  pub fn with_group_property(mut self, group: &str, name: &str, ty: Type) -> StaticEnvironment {
    self
      .group_properties
      .entry(group.to_string())
      .or_default()
      .insert(name.to_string(), ty);
    self
  }

  pub fn with_group_method(
    mut self,
    group: &str,
    name: &str,
    signature: Signature,
  ) -> StaticEnvironment {
    self
      .group_methods
      .entry(group.to_string())
      .or_default()
      .insert(name.to_string(), signature);
    self
  }

  pub fn with_primitives(mut self, primitives: PrimitiveTypes) -> StaticEnvironment {
    self.primitives = primitives;
    self
  }
}

impl Environment for StaticEnvironment {
  fn type_of_builtin(&self, name: &str) -> Type {
    self.builtins.get(name).cloned().unwrap_or_else(Type::unknown)
  }

  fn type_of_property(&self, name: &str, group: Option<&str>) -> Type {
    let table = match group {
      Some(group) => match self.group_properties.get(group) {
        Some(table) => table,
        None => return Type::unknown(),
      },
      None => &self.properties,
    };
    table.get(name).cloned().unwrap_or_else(Type::unknown)
  }

  fn signature_of_method(&self, name: &str, group: Option<&str>) -> Option<Signature> {
    match group {
      Some(group) => self.group_methods.get(group)?.get(name).cloned(),
      None => self.methods.get(name).cloned(),
    }
  }

  fn int_type(&self) -> Type {
    self.primitives.int.clone()
  }

  fn float_type(&self) -> Type {
    self.primitives.float.clone()
  }

  fn boolean_type(&self) -> Type {
    self.primitives.boolean.clone()
  }

  fn string_type(&self) -> Type {
    self.primitives.string.clone()
  }

  fn bigint_type(&self) -> Type {
    self.primitives.bigint.clone()
  }

  fn regexp_type(&self) -> Type {
    self.primitives.regexp.clone()
  }

  fn array_type(&self) -> Type {
    self.primitives.array.clone()
  }
}
