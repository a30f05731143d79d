//! The abstract interpreter: one transfer rule per IR operation family.
//!
//! The builder calls [`Typer::analyze`] after appending each operation;
//! queries read the innermost scope defining the variable. Inference never
//! fails: anything the engine cannot model widens to `Type::unknown()`.
//! Mismatched block operations are builder bugs and abort.

use crate::class_typing::ClassTyping;
use crate::env::Environment;
use crate::ir::BinaryOperator;
use crate::ir::Op;
use crate::ir::UnaryOperator;
use crate::ir::Variable;
use crate::object_literal::ObjectLiteralTyping;
use crate::scopes::BlockKind;
use crate::scopes::FrameDiff;
use crate::scopes::ScopeStack;
use ahash::AHashMap;
use types_js::Signature;
use types_js::Type;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionKind {
  Plain,
  Arrow,
  Generator,
  Async,
  AsyncArrow,
  AsyncGenerator,
  Constructor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TrySection {
  Try,
  Catch,
  Finally,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MemberKind {
  Constructor,
  InstanceMethod,
  InstanceGetter,
  InstanceSetter,
  StaticMethod,
  StaticGetter,
  StaticSetter,
  PrivateInstanceMethod,
  PrivateStaticMethod,
  StaticInitializer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LiteralMemberKind {
  Method,
  Getter,
  Setter,
}

/// One entry per open block, mirroring the builder's nesting. Carries the
/// bookkeeping each `End…` operation needs to close its block.
#[derive(Debug)]
enum BlockContext {
  If { then_diff: Option<FrameDiff> },
  Loop,
  Switch { diffs: Vec<FrameDiff>, has_default: bool },
  SwitchCase,
  Try { section: TrySection },
  Function { kind: FunctionKind },
  Class(Box<ClassTyping>),
  ClassMember { kind: MemberKind },
  ObjectLiteral(ObjectLiteralTyping),
  ObjectLiteralMember { kind: LiteralMemberKind },
}

#[derive(Debug)]
pub struct Typer<E: Environment> {
  env: E,
  scopes: ScopeStack,
  contexts: Vec<BlockContext>,
  this_types: Vec<Type>,
  return_types: Vec<Type>,
  declared_properties: AHashMap<String, Type>,
  declared_methods: AHashMap<String, Signature>,
}

impl<E: Environment> Typer<E> {
  pub fn new(env: E) -> Typer<E> {
    Typer {
      env,
      scopes: ScopeStack::new(),
      contexts: Vec::new(),
      this_types: Vec::new(),
      return_types: Vec::new(),
      declared_properties: AHashMap::new(),
      declared_methods: AHashMap::new(),
    }
  }

  pub fn env(&self) -> &E {
    &self.env
  }

  /// Forget every variable and open block. Builder declarations made via
  /// [`set_type_of_property`](Self::set_type_of_property) are cleared too.
  pub fn reset(&mut self) {
    self.scopes.reset();
    self.contexts.clear();
    self.this_types.clear();
    self.return_types.clear();
    self.declared_properties.clear();
    self.declared_methods.clear();
  }

  /// The current inferred type of `var`; `Type::unknown()` if the engine
  /// never saw it.
  pub fn type_of(&self, var: Variable) -> Type {
    self.scopes.get(var).cloned().unwrap_or_else(Type::unknown)
  }

  /// The instance type of the enclosing class's superclass.
  pub fn current_super_type(&self) -> Type {
    self
      .contexts
      .iter()
      .rev()
      .find_map(|ctx| match ctx {
        BlockContext::Class(class) => Some(class.super_type.clone()),
        _ => None,
      })
      .flatten()
      .unwrap_or_else(Type::unknown)
  }

  /// The full class value of the enclosing class's superclass.
  pub fn current_super_constructor_type(&self) -> Type {
    self
      .contexts
      .iter()
      .rev()
      .find_map(|ctx| match ctx {
        BlockContext::Class(class) => Some(class.super_constructor_type.clone()),
        _ => None,
      })
      .flatten()
      .unwrap_or_else(Type::unknown)
  }

  /// The declared return type of the innermost open function body.
  pub fn current_return_type(&self) -> Type {
    self
      .return_types
      .last()
      .cloned()
      .unwrap_or_else(Type::unknown)
  }

  /// Program-wide declaration: `name` has type `ty` wherever the receiver's
  /// group is unknown to the environment. Accumulates; later declarations
  /// for the same name win.
  pub fn set_type_of_property(&mut self, name: &str, ty: Type) {
    self.declared_properties.insert(name.to_string(), ty);
  }

  /// Program-wide declaration of a method signature, analogous to
  /// [`set_type_of_property`](Self::set_type_of_property).
  pub fn set_signature_of_method(&mut self, name: &str, signature: Signature) {
    self.declared_methods.insert(name.to_string(), signature);
  }

  fn t(&self, var: Variable) -> Type {
    self.type_of(var)
  }

  fn only(outputs: &[Variable]) -> Variable {
    assert!(outputs.len() == 1, "operation must produce exactly one output");
    outputs[0]
  }

  /// Per-group environment knowledge wins, then builder declarations, then
  /// the environment's program-global table.
  fn property_type(&self, name: &str, receiver: &Type) -> Type {
    if let Some(group) = receiver.group() {
      let ty = self.env.type_of_property(name, Some(group));
      if !ty.is_unknown() {
        return ty;
      }
    }
    if let Some(ty) = self.declared_properties.get(name) {
      return ty.clone();
    }
    self.env.type_of_property(name, None)
  }

  fn method_signature(&self, name: &str, receiver: &Type) -> Option<Signature> {
    if let Some(group) = receiver.group() {
      if let Some(sig) = self.env.signature_of_method(name, Some(group)) {
        return Some(sig);
      }
    }
    if let Some(sig) = self.declared_methods.get(name) {
      return Some(sig.clone());
    }
    self.env.signature_of_method(name, None)
  }

  fn unary_result(&self, op: UnaryOperator, operand: &Type) -> Type {
    match op {
      UnaryOperator::LogicalNot => Type::boolean(),
      _ if operand.is(&Type::bigint()) => Type::bigint(),
      _ => Type::primitive(),
    }
  }

  fn binary_result(&self, op: BinaryOperator, lhs: &Type, rhs: &Type) -> Type {
    match op {
      BinaryOperator::LogicAnd | BinaryOperator::LogicOr => lhs
        .union(rhs)
        .union(&Type::boolean())
        .intersect(&Type::primitive()),
      _ => {
        if lhs.is(&Type::integer()) && rhs.is(&Type::integer()) {
          Type::number()
        } else if lhs.is(&Type::bigint()) && rhs.is(&Type::bigint()) {
          Type::bigint()
        } else if lhs.may_be(&Type::bigint()) || rhs.may_be(&Type::bigint()) {
          Type::primitive() | Type::bigint()
        } else {
          Type::primitive()
        }
      }
    }
  }

  fn bind_parameters(&mut self, signature: &Signature, params: &[Variable]) {
    for (index, &var) in params.iter().enumerate() {
      let ty = match signature.params.get(index) {
        // A rest parameter binds the collected arguments, which are always
        // array-like regardless of the element type.
        Some(param) if param.rest => Type::object(),
        Some(param) if param.optional => param.ty.clone() | Type::undefined(),
        Some(param) => param.ty.clone(),
        None => Type::unknown(),
      };
      self.scopes.define(var, ty);
    }
  }

  fn function_value(&self, kind: FunctionKind, signature: &Signature) -> Type {
    match kind {
      FunctionKind::Plain => Type::function_and_constructor(signature.clone()),
      FunctionKind::Constructor => Type::constructor(Signature::new(
        signature.params.clone(),
        Type::object(),
      )),
      _ => Type::function(signature.clone()),
    }
  }

  fn begin_function(&mut self, kind: FunctionKind, signature: &Signature, outputs: &[Variable]) {
    assert!(!outputs.is_empty(), "function definition must produce the function variable");
    let fn_var = outputs[0];
    self.scopes.define(fn_var, self.function_value(kind, signature));
    self.scopes.push(BlockKind::Function);
    let mut params = &outputs[1..];
    if kind == FunctionKind::Constructor {
      if let Some((&this_var, rest)) = params.split_first() {
        self.scopes.define(this_var, Type::object());
        params = rest;
      }
      self.this_types.push(Type::object());
    }
    self.bind_parameters(signature, params);
    self.return_types.push(match kind {
      FunctionKind::Constructor => Type::object(),
      _ => signature.ret.clone(),
    });
    self.contexts.push(BlockContext::Function { kind });
  }

  fn end_function(&mut self, kind: FunctionKind) {
    match self.contexts.pop() {
      Some(BlockContext::Function { kind: open }) if open == kind => {}
      _ => panic!("function end does not match the open block"),
    }
    if kind == FunctionKind::Constructor {
      self.this_types.pop();
    }
    self.return_types.pop();
    let diff = self.scopes.pop();
    // The body may never run, or run many times: free-variable writes widen.
    self.scopes.merge_branches(&[diff], true);
  }

  fn begin_loop(&mut self) {
    self.scopes.push(BlockKind::Loop);
    self.contexts.push(BlockContext::Loop);
  }

  fn end_loop(&mut self) {
    match self.contexts.pop() {
      Some(BlockContext::Loop) => {}
      _ => panic!("loop end does not match the open block"),
    }
    let diff = self.scopes.pop();
    self.scopes.merge_branches(&[diff], true);
  }

  fn class_mut(&mut self, op_name: &str) -> &mut ClassTyping {
    match self.contexts.last_mut() {
      Some(BlockContext::Class(class)) => class,
      _ => panic!("{op_name} outside of a class definition"),
    }
  }

  fn literal_mut(&mut self, op_name: &str) -> &mut ObjectLiteralTyping {
    match self.contexts.last_mut() {
      Some(BlockContext::ObjectLiteral(literal)) => literal,
      _ => panic!("{op_name} outside of an object literal"),
    }
  }

  fn begin_class_member(
    &mut self,
    kind: MemberKind,
    frame: BlockKind,
    this: Type,
    ret: Type,
    signature: Option<&Signature>,
    outputs: &[Variable],
  ) {
    self.scopes.push(frame);
    match signature {
      Some(signature) => self.bind_parameters(signature, outputs),
      None => {
        for &var in outputs {
          self.scopes.define(var, Type::unknown());
        }
      }
    }
    self.this_types.push(this);
    self.return_types.push(ret);
    self.contexts.push(BlockContext::ClassMember { kind });
  }

  fn end_class_member(&mut self, kind: MemberKind) {
    match self.contexts.pop() {
      Some(BlockContext::ClassMember { kind: open }) if open == kind => {}
      _ => panic!("class member end does not match the open block"),
    }
    self.this_types.pop();
    self.return_types.pop();
    let diff = self.scopes.pop();
    // Member bodies may never run; merging immediately makes the widened
    // writes visible to subsequently declared siblings.
    self.scopes.merge_branches(&[diff], true);
  }

  fn begin_literal_member(
    &mut self,
    kind: LiteralMemberKind,
    this: Type,
    ret: Type,
    signature: Option<&Signature>,
    outputs: &[Variable],
  ) {
    self.scopes.push(BlockKind::ClassMethod);
    match signature {
      Some(signature) => self.bind_parameters(signature, outputs),
      None => {
        for &var in outputs {
          self.scopes.define(var, Type::unknown());
        }
      }
    }
    self.this_types.push(this);
    self.return_types.push(ret);
    self.contexts.push(BlockContext::ObjectLiteralMember { kind });
  }

  fn end_literal_member(&mut self, kind: LiteralMemberKind) {
    match self.contexts.pop() {
      Some(BlockContext::ObjectLiteralMember { kind: open }) if open == kind => {}
      _ => panic!("object literal member end does not match the open block"),
    }
    self.this_types.pop();
    self.return_types.pop();
    let diff = self.scopes.pop();
    self.scopes.merge_branches(&[diff], true);
  }

  /// Run the transfer function for `op`. Must be called for every operation
  /// the builder appends, in program order.
  pub fn analyze(&mut self, op: &Op, inputs: &[Variable], outputs: &[Variable]) {
    match op {
      Op::LoadInteger(_) => self.scopes.define(Self::only(outputs), self.env.int_type()),
      Op::LoadFloat(_) => self.scopes.define(Self::only(outputs), self.env.float_type()),
      Op::LoadString(_) => self.scopes.define(Self::only(outputs), self.env.string_type()),
      Op::LoadBoolean(_) => self.scopes.define(Self::only(outputs), self.env.boolean_type()),
      Op::LoadBigInt(_) => self.scopes.define(Self::only(outputs), self.env.bigint_type()),
      Op::LoadRegExp { .. } => self.scopes.define(Self::only(outputs), self.env.regexp_type()),
      Op::LoadNull => self.scopes.define(Self::only(outputs), Type::null()),
      Op::LoadUndefined => self.scopes.define(Self::only(outputs), Type::undefined()),
      Op::LoadThis => {
        let ty = self.this_types.last().cloned().unwrap_or_else(Type::object);
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::LoadBuiltin(name) => {
        let ty = self.env.type_of_builtin(name);
        self.scopes.define(Self::only(outputs), ty);
      }

      Op::CreateObject { property_names } => {
        let mut ty = Type::object();
        for name in property_names {
          ty = ty.adding_property(name);
        }
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::CreateArray => self.scopes.define(Self::only(outputs), self.env.array_type()),

      Op::UnaryOperation(unary_op) => {
        let ty = self.unary_result(*unary_op, &self.t(inputs[0]));
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::BinaryOperation(binary_op) => {
        let ty = self.binary_result(*binary_op, &self.t(inputs[0]), &self.t(inputs[1]));
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::TernaryOperation => {
        let ty = self.t(inputs[1]).union(&self.t(inputs[2]));
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::Compare(_) | Op::TestInstanceOf | Op::TestIn => {
        self.scopes.define(Self::only(outputs), Type::boolean());
      }

      Op::Reassign => self.scopes.set(inputs[0], self.t(inputs[1])),
      Op::Update(binary_op) => {
        let ty = self.binary_result(*binary_op, &self.t(inputs[0]), &self.t(inputs[1]));
        self.scopes.set(inputs[0], ty);
      }
      Op::Dup => self.scopes.define(Self::only(outputs), self.t(inputs[0])),

      Op::GetProperty(name) => {
        let ty = self.property_type(name, &self.t(inputs[0]));
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::SetProperty(name) => {
        let ty = self.t(inputs[0]).adding_property(name);
        self.scopes.set(inputs[0], ty);
      }
      Op::DeleteProperty(name) => {
        let ty = self.t(inputs[0]).removing_property(name);
        self.scopes.set(inputs[0], ty);
      }
      Op::GetElement(_) | Op::GetComputedProperty => {
        self.scopes.define(Self::only(outputs), Type::unknown());
      }
      Op::SetElement(_) | Op::SetComputedProperty => {}
      Op::DestructObject { properties, has_rest } => {
        let receiver = self.t(inputs[0]);
        let expected = properties.len() + usize::from(*has_rest);
        assert!(outputs.len() == expected, "destructuring arity mismatch");
        for (name, &out) in properties.iter().zip(outputs) {
          let ty = self.property_type(name, &receiver);
          self.scopes.define(out, ty);
        }
        if *has_rest {
          self.scopes.define(outputs[properties.len()], Type::object());
        }
      }
      Op::DestructArray { indices, has_rest } => {
        let expected = indices.len() + usize::from(*has_rest);
        assert!(outputs.len() == expected, "destructuring arity mismatch");
        for &out in &outputs[..indices.len()] {
          self.scopes.define(out, Type::unknown());
        }
        if *has_rest {
          self.scopes.define(outputs[indices.len()], Type::object());
        }
      }

      Op::CallFunction => {
        let ty = self
          .t(inputs[0])
          .call_signature()
          .map(|sig| sig.ret.clone())
          .unwrap_or_else(Type::unknown);
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::CallMethod(name) => {
        let ty = self
          .method_signature(name, &self.t(inputs[0]))
          .map(|sig| sig.ret)
          .unwrap_or_else(Type::unknown);
        self.scopes.define(Self::only(outputs), ty);
      }
      Op::Construct => {
        let ty = self
          .t(inputs[0])
          .construct_signature()
          .map(|sig| sig.ret.clone())
          .unwrap_or_else(Type::object);
        self.scopes.define(Self::only(outputs), ty);
      }

      Op::Return | Op::ThrowException => {}
      Op::Await | Op::Yield => self.scopes.define(Self::only(outputs), Type::unknown()),

      Op::BeginPlainFunction(sig) => self.begin_function(FunctionKind::Plain, sig, outputs),
      Op::EndPlainFunction => self.end_function(FunctionKind::Plain),
      Op::BeginArrowFunction(sig) => self.begin_function(FunctionKind::Arrow, sig, outputs),
      Op::EndArrowFunction => self.end_function(FunctionKind::Arrow),
      Op::BeginGeneratorFunction(sig) => self.begin_function(FunctionKind::Generator, sig, outputs),
      Op::EndGeneratorFunction => self.end_function(FunctionKind::Generator),
      Op::BeginAsyncFunction(sig) => self.begin_function(FunctionKind::Async, sig, outputs),
      Op::EndAsyncFunction => self.end_function(FunctionKind::Async),
      Op::BeginAsyncArrowFunction(sig) => self.begin_function(FunctionKind::AsyncArrow, sig, outputs),
      Op::EndAsyncArrowFunction => self.end_function(FunctionKind::AsyncArrow),
      Op::BeginAsyncGeneratorFunction(sig) => {
        self.begin_function(FunctionKind::AsyncGenerator, sig, outputs)
      }
      Op::EndAsyncGeneratorFunction => self.end_function(FunctionKind::AsyncGenerator),
      Op::BeginConstructor(sig) => self.begin_function(FunctionKind::Constructor, sig, outputs),
      Op::EndConstructor => self.end_function(FunctionKind::Constructor),

      Op::BeginIf => {
        self.scopes.push(BlockKind::Conditional);
        self.contexts.push(BlockContext::If { then_diff: None });
      }
      Op::BeginElse => {
        let diff = self.scopes.pop();
        match self.contexts.last_mut() {
          Some(BlockContext::If { then_diff: then_diff @ None }) => *then_diff = Some(diff),
          _ => panic!("BeginElse without an open if"),
        }
        self.scopes.push(BlockKind::Conditional);
      }
      Op::EndIf => match self.contexts.pop() {
        Some(BlockContext::If { then_diff: Some(then_diff) }) => {
          let else_diff = self.scopes.pop();
          self.scopes.merge_branches(&[then_diff, else_diff], false);
        }
        Some(BlockContext::If { then_diff: None }) => {
          let diff = self.scopes.pop();
          self.scopes.merge_branches(&[diff], true);
        }
        _ => panic!("EndIf without matching BeginIf"),
      },

      Op::BeginWhileLoop | Op::BeginDoWhileLoop => self.begin_loop(),
      Op::BeginForLoop => {
        self.begin_loop();
        if let Some(&loop_var) = outputs.first() {
          self.scopes.define(loop_var, Type::primitive());
        }
      }
      Op::BeginForInLoop => {
        self.begin_loop();
        self.scopes.define(Self::only(outputs), Type::string());
      }
      Op::BeginForOfLoop => {
        self.begin_loop();
        self.scopes.define(Self::only(outputs), Type::unknown());
      }
      Op::BeginRepeatLoop { .. } => {
        self.begin_loop();
        if let Some(&counter) = outputs.first() {
          self.scopes.define(counter, Type::integer());
        }
      }
      Op::EndWhileLoop
      | Op::EndDoWhileLoop
      | Op::EndForLoop
      | Op::EndForInLoop
      | Op::EndForOfLoop
      | Op::EndRepeatLoop => self.end_loop(),

      Op::BeginSwitch => {
        self.contexts.push(BlockContext::Switch {
          diffs: Vec::new(),
          has_default: false,
        });
      }
      Op::BeginSwitchCase => {
        match self.contexts.last() {
          Some(BlockContext::Switch { .. }) => {}
          _ => panic!("BeginSwitchCase outside of a switch"),
        }
        self.scopes.push(BlockKind::SwitchCase);
        self.contexts.push(BlockContext::SwitchCase);
      }
      Op::BeginSwitchDefaultCase => {
        match self.contexts.last_mut() {
          Some(BlockContext::Switch { has_default, .. }) => *has_default = true,
          _ => panic!("BeginSwitchDefaultCase outside of a switch"),
        }
        self.scopes.push(BlockKind::SwitchCase);
        self.contexts.push(BlockContext::SwitchCase);
      }
      Op::EndSwitchCase => {
        match self.contexts.pop() {
          Some(BlockContext::SwitchCase) => {}
          _ => panic!("EndSwitchCase without an open case"),
        }
        let diff = self.scopes.pop();
        match self.contexts.last_mut() {
          Some(BlockContext::Switch { diffs, .. }) => diffs.push(diff),
          _ => panic!("EndSwitchCase outside of a switch"),
        }
      }
      Op::EndSwitch => match self.contexts.pop() {
        Some(BlockContext::Switch { diffs, has_default }) => {
          self.scopes.merge_branches(&diffs, !has_default);
        }
        _ => panic!("EndSwitch without matching BeginSwitch"),
      },

      Op::BeginTry => {
        self.scopes.push(BlockKind::Try);
        self.contexts.push(BlockContext::Try {
          section: TrySection::Try,
        });
      }
      Op::BeginCatch => {
        match self.contexts.last_mut() {
          Some(BlockContext::Try { section: section @ TrySection::Try }) => {
            *section = TrySection::Catch
          }
          _ => panic!("BeginCatch without an open try"),
        }
        let diff = self.scopes.pop();
        self.scopes.merge_branches(&[diff], true);
        self.scopes.push(BlockKind::Catch);
        if let Some(&exception) = outputs.first() {
          self.scopes.define(exception, Type::unknown());
        }
      }
      Op::BeginFinally => {
        match self.contexts.last_mut() {
          Some(BlockContext::Try { section }) if *section != TrySection::Finally => {
            *section = TrySection::Finally
          }
          _ => panic!("BeginFinally without an open try or catch"),
        }
        let diff = self.scopes.pop();
        self.scopes.merge_branches(&[diff], true);
        self.scopes.push(BlockKind::Finally);
      }
      Op::EndTryCatchFinally => {
        match self.contexts.pop() {
          Some(BlockContext::Try { .. }) => {}
          _ => panic!("EndTryCatchFinally without matching BeginTry"),
        }
        let diff = self.scopes.pop();
        self.scopes.merge_branches(&[diff], true);
      }

      Op::BeginClassDefinition { has_superclass } => {
        let superclass = has_superclass.then(|| self.t(inputs[0]));
        let class_var = Self::only(outputs);
        // The class variable is referenceable inside the body (e.g. from a
        // static initializer) before the full value is known.
        self.scopes.define(class_var, Type::object());
        self.scopes.push(BlockKind::ClassBody);
        self
          .contexts
          .push(BlockContext::Class(Box::new(ClassTyping::new(
            class_var, superclass,
          ))));
      }
      Op::EndClassDefinition => {
        let class = match self.contexts.pop() {
          Some(BlockContext::Class(class)) => class,
          _ => panic!("EndClassDefinition without matching BeginClassDefinition"),
        };
        let diff = self.scopes.pop();
        self.scopes.merge_branches(&[diff], true);
        self.scopes.set(class.class_var, class.class_value());
      }

      Op::ClassAddInstanceProperty(name) => {
        let class = self.class_mut("ClassAddInstanceProperty");
        class.instance = class.instance.adding_property(name);
      }
      Op::ClassAddStaticProperty(name) => {
        let class = self.class_mut("ClassAddStaticProperty");
        class.statics = class.statics.adding_property(name);
      }

      Op::BeginClassConstructor(sig) => {
        let class = self.class_mut("BeginClassConstructor");
        class.constructor_signature = Some(sig.clone());
        self.scopes.push(BlockKind::ClassMethod);
        if let Some((&this_var, params)) = outputs.split_first() {
          self.scopes.define(this_var, Type::object());
          self.bind_parameters(sig, params);
        }
        self.this_types.push(Type::object());
        self.return_types.push(Type::object());
        self.contexts.push(BlockContext::ClassMember {
          kind: MemberKind::Constructor,
        });
      }
      Op::EndClassConstructor => self.end_class_member(MemberKind::Constructor),

      Op::BeginClassInstanceMethod { name, signature } => {
        let class = self.class_mut("BeginClassInstanceMethod");
        class.instance = class.instance.adding_method(name);
        let this = class.instance.clone();
        let ret = signature.ret.clone();
        self.begin_class_member(
          MemberKind::InstanceMethod,
          BlockKind::ClassMethod,
          this,
          ret,
          Some(signature),
          outputs,
        );
      }
      Op::EndClassInstanceMethod => self.end_class_member(MemberKind::InstanceMethod),

      Op::BeginClassInstanceGetter(name) => {
        let class = self.class_mut("BeginClassInstanceGetter");
        // The accessor body sees the shape before its own name lands.
        let this = class.instance.clone();
        class.instance = class.instance.adding_property(name);
        self.begin_class_member(
          MemberKind::InstanceGetter,
          BlockKind::ClassMethod,
          this,
          Type::unknown(),
          None,
          outputs,
        );
      }
      Op::EndClassInstanceGetter => self.end_class_member(MemberKind::InstanceGetter),

      Op::BeginClassInstanceSetter(name) => {
        let class = self.class_mut("BeginClassInstanceSetter");
        let this = class.instance.clone();
        class.instance = class.instance.adding_property(name);
        self.begin_class_member(
          MemberKind::InstanceSetter,
          BlockKind::ClassMethod,
          this,
          Type::unknown(),
          None,
          outputs,
        );
      }
      Op::EndClassInstanceSetter => self.end_class_member(MemberKind::InstanceSetter),

      Op::BeginClassStaticMethod { name, signature } => {
        let class = self.class_mut("BeginClassStaticMethod");
        class.statics = class.statics.adding_method(name);
        let this = class.statics.clone();
        let ret = signature.ret.clone();
        self.begin_class_member(
          MemberKind::StaticMethod,
          BlockKind::ClassStatic,
          this,
          ret,
          Some(signature),
          outputs,
        );
      }
      Op::EndClassStaticMethod => self.end_class_member(MemberKind::StaticMethod),

      Op::BeginClassStaticGetter(name) => {
        let class = self.class_mut("BeginClassStaticGetter");
        let this = class.statics.clone();
        class.statics = class.statics.adding_property(name);
        self.begin_class_member(
          MemberKind::StaticGetter,
          BlockKind::ClassStatic,
          this,
          Type::unknown(),
          None,
          outputs,
        );
      }
      Op::EndClassStaticGetter => self.end_class_member(MemberKind::StaticGetter),

      Op::BeginClassStaticSetter(name) => {
        let class = self.class_mut("BeginClassStaticSetter");
        let this = class.statics.clone();
        class.statics = class.statics.adding_property(name);
        self.begin_class_member(
          MemberKind::StaticSetter,
          BlockKind::ClassStatic,
          this,
          Type::unknown(),
          None,
          outputs,
        );
      }
      Op::EndClassStaticSetter => self.end_class_member(MemberKind::StaticSetter),

      Op::BeginClassPrivateInstanceMethod { signature, .. } => {
        let class = self.class_mut("BeginClassPrivateInstanceMethod");
        // Private names never surface on the class or instance type; the
        // body still sees everything accumulated so far.
        let this = class.instance.clone();
        let ret = signature.ret.clone();
        self.begin_class_member(
          MemberKind::PrivateInstanceMethod,
          BlockKind::ClassMethod,
          this,
          ret,
          Some(signature),
          outputs,
        );
      }
      Op::EndClassPrivateInstanceMethod => {
        self.end_class_member(MemberKind::PrivateInstanceMethod)
      }

      Op::BeginClassPrivateStaticMethod { signature, .. } => {
        let class = self.class_mut("BeginClassPrivateStaticMethod");
        let this = class.statics.clone();
        let ret = signature.ret.clone();
        self.begin_class_member(
          MemberKind::PrivateStaticMethod,
          BlockKind::ClassStatic,
          this,
          ret,
          Some(signature),
          outputs,
        );
      }
      Op::EndClassPrivateStaticMethod => self.end_class_member(MemberKind::PrivateStaticMethod),

      Op::BeginClassStaticInitializer => {
        let class = self.class_mut("BeginClassStaticInitializer");
        let this = class.statics.clone();
        self.begin_class_member(
          MemberKind::StaticInitializer,
          BlockKind::ClassStaticInitializer,
          this,
          Type::unknown(),
          None,
          outputs,
        );
      }
      Op::EndClassStaticInitializer => self.end_class_member(MemberKind::StaticInitializer),

      Op::BeginObjectLiteral => {
        self.scopes.push(BlockKind::ObjectLiteral);
        self
          .contexts
          .push(BlockContext::ObjectLiteral(ObjectLiteralTyping::new()));
      }
      Op::EndObjectLiteral => {
        let literal = match self.contexts.pop() {
          Some(BlockContext::ObjectLiteral(literal)) => literal,
          _ => panic!("EndObjectLiteral without matching BeginObjectLiteral"),
        };
        let diff = self.scopes.pop();
        self.scopes.merge_branches(&[diff], true);
        self.scopes.define(Self::only(outputs), literal.ty);
      }
      Op::ObjectLiteralAddProperty(name) => {
        let literal = self.literal_mut("ObjectLiteralAddProperty");
        literal.ty = literal.ty.adding_property(name);
      }
      // Integer-indexed elements leave no trace in the shape.
      Op::ObjectLiteralAddElement(_) => {
        self.literal_mut("ObjectLiteralAddElement");
      }
      Op::BeginObjectLiteralMethod { name, signature } => {
        let literal = self.literal_mut("BeginObjectLiteralMethod");
        literal.ty = literal.ty.adding_method(name);
        let this = literal.ty.clone();
        let ret = signature.ret.clone();
        self.begin_literal_member(
          LiteralMemberKind::Method,
          this,
          ret,
          Some(signature),
          outputs,
        );
      }
      Op::EndObjectLiteralMethod => self.end_literal_member(LiteralMemberKind::Method),
      Op::BeginObjectLiteralGetter(name) => {
        let literal = self.literal_mut("BeginObjectLiteralGetter");
        let this = literal.ty.clone();
        literal.ty = literal.ty.adding_property(name);
        self.begin_literal_member(LiteralMemberKind::Getter, this, Type::unknown(), None, outputs);
      }
      Op::EndObjectLiteralGetter => self.end_literal_member(LiteralMemberKind::Getter),
      Op::BeginObjectLiteralSetter(name) => {
        let literal = self.literal_mut("BeginObjectLiteralSetter");
        let this = literal.ty.clone();
        literal.ty = literal.ty.adding_property(name);
        self.begin_literal_member(LiteralMemberKind::Setter, this, Type::unknown(), None, outputs);
      }
      Op::EndObjectLiteralSetter => self.end_literal_member(LiteralMemberKind::Setter),
    }
  }
}
