//! End-to-end inference scenarios exercising the documented contract of the
//! engine on small programs.

mod common;

use common::Program;
use typer_js::BinaryOperator;
use typer_js::Op;
use typer_js::StaticEnvironment;
use types_js::Param;
use types_js::Signature;
use types_js::Type;

#[test]
fn string_concatenation_widens_to_primitive() {
  let mut p = Program::new();
  let v = p.load_int(42);
  let s = p.load_string("x");
  let r = p.op(Op::BinaryOperation(BinaryOperator::Add), &[v, s]);
  assert_eq!(p.ty(r), Type::primitive());
  assert_eq!(p.ty(v), Type::integer());
}

#[test]
fn object_literal_accumulates_named_members_and_ignores_elements() {
  let mut p = Program::new();
  let value = p.load_int(1);
  p.stmt(Op::BeginObjectLiteral, &[]);
  p.stmt(Op::ObjectLiteralAddProperty("a".into()), &[value]);
  p.op_n(
    Op::BeginObjectLiteralMethod {
      name: "m".into(),
      signature: Signature::returning(Type::undefined()),
    },
    &[],
    0,
  );
  p.stmt(Op::EndObjectLiteralMethod, &[]);
  p.op_n(Op::BeginObjectLiteralGetter("b".into()), &[], 0);
  p.stmt(Op::EndObjectLiteralGetter, &[]);
  p.op_n(Op::BeginObjectLiteralSetter("c".into()), &[], 1);
  p.stmt(Op::EndObjectLiteralSetter, &[]);
  p.stmt(Op::ObjectLiteralAddElement(0), &[value]);
  let obj = p.op(Op::EndObjectLiteral, &[]);

  assert_eq!(p.ty(obj), Type::object_with(&["a", "b", "c"], &["m"]));
}

#[test]
fn class_value_combines_statics_with_construct_signature() {
  let mut p = Program::new();
  let void_sig = Signature::returning(Type::undefined());

  let class = p.op(Op::BeginClassDefinition { has_superclass: false }, &[]);
  p.stmt(Op::ClassAddInstanceProperty("a".into()), &[]);
  p.stmt(Op::ClassAddInstanceProperty("b".into()), &[]);
  p.op_n(
    Op::BeginClassInstanceMethod { name: "f".into(), signature: void_sig.clone() },
    &[],
    0,
  );
  p.stmt(Op::EndClassInstanceMethod, &[]);
  p.op_n(Op::BeginClassInstanceGetter("c".into()), &[], 0);
  p.stmt(Op::EndClassInstanceGetter, &[]);
  p.op_n(
    Op::BeginClassInstanceMethod { name: "g".into(), signature: void_sig.clone() },
    &[],
    0,
  );
  p.stmt(Op::EndClassInstanceMethod, &[]);
  p.stmt(Op::ClassAddStaticProperty("a".into()), &[]);
  p.stmt(Op::ClassAddStaticProperty("d".into()), &[]);
  p.op_n(
    Op::BeginClassStaticMethod { name: "g".into(), signature: void_sig.clone() },
    &[],
    0,
  );
  p.stmt(Op::EndClassStaticMethod, &[]);
  p.op_n(Op::BeginClassStaticSetter("e".into()), &[], 1);
  p.stmt(Op::EndClassStaticSetter, &[]);
  p.op_n(
    Op::BeginClassStaticMethod { name: "h".into(), signature: void_sig },
    &[],
    0,
  );
  p.stmt(Op::EndClassStaticMethod, &[]);
  let ctor_sig = Signature::new(vec![Param::plain(Type::string())], Type::undefined());
  p.op_n(Op::BeginClassConstructor(ctor_sig), &[], 2);
  p.stmt(Op::EndClassConstructor, &[]);
  p.stmt(Op::EndClassDefinition, &[]);

  let instance = Type::object_with(&["a", "b", "c"], &["f", "g"]);
  let expected = Type::object_with(&["a", "d", "e"], &["g", "h"])
    + Type::constructor(Signature::new(vec![Param::plain(Type::string())], instance));
  assert_eq!(p.ty(class), expected);
}

#[test]
fn if_else_where_both_arms_assign_replaces_the_previous_type() {
  let mut p = Program::new();
  let v = p.load_int(42);
  p.stmt(Op::BeginIf, &[v]);
  let s = p.load_string("s");
  p.reassign(v, s);
  p.stmt(Op::BeginElse, &[]);
  let f = p.load_float(13.37);
  p.reassign(v, f);
  p.stmt(Op::EndIf, &[]);

  assert_eq!(p.ty(v), Type::string() | Type::float());
}

#[test]
fn if_without_else_keeps_the_previous_type_possible() {
  let mut p = Program::new();
  let v = p.load_int(42);
  p.stmt(Op::BeginIf, &[v]);
  let s = p.load_string("s");
  p.reassign(v, s);
  p.stmt(Op::EndIf, &[]);

  assert_eq!(p.ty(v), Type::integer() | Type::string());
}

#[test]
fn property_types_resolve_through_the_receiver_group() {
  let env = StaticEnvironment::new()
    .with_builtin("B", Type::object_of_group("B", &[], &[]))
    .with_builtin("C", Type::object())
    .with_group_property("B", "foo", Type::float());
  let mut p = Program::with_env(env);

  let b = p.op(Op::LoadBuiltin("B".into()), &[]);
  let foo = p.op(Op::GetProperty("foo".into()), &[b]);
  assert_eq!(p.ty(foo), Type::float());

  let c = p.op(Op::LoadBuiltin("C".into()), &[]);
  let missing = p.op(Op::GetProperty("foo".into()), &[c]);
  assert!(p.ty(missing).is_unknown());
}

#[test]
fn reanalyzing_the_same_program_is_deterministic() {
  fn run(p: &mut Program<StaticEnvironment>) -> Vec<Type> {
    let v = p.load_int(42);
    p.stmt(Op::BeginIf, &[v]);
    let s = p.load_string("s");
    p.reassign(v, s);
    p.stmt(Op::BeginElse, &[]);
    let o = p.op(Op::CreateObject { property_names: vec!["k".into()] }, &[]);
    p.reassign(v, o);
    p.stmt(Op::EndIf, &[]);
    vec![p.ty(v), p.ty(s), p.ty(o)]
  }

  let mut p = Program::new();
  let first = run(&mut p);
  p.reset();
  let second = run(&mut p);
  assert_eq!(first, second);
}
