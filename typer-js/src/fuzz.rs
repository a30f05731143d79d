use crate::env::StaticEnvironment;
use crate::ir::BinaryOperator;
use crate::ir::Op;
use crate::ir::Variable;
use crate::typer::Typer;
use types_js::Type;

/// Fuzzing entry point: interprets the input as a stream of straight-line
/// operations and asserts that analysis and queries never panic and that a
/// rerun from [`Typer::reset`] reproduces identical answers.
pub fn fuzz_typer(data: &[u8]) {
  let mut typer = Typer::new(StaticEnvironment::new());
  let answers = run(&mut typer, data);
  typer.reset();
  let again = run(&mut typer, data);
  assert_eq!(answers, again);
}

fn run(typer: &mut Typer<StaticEnvironment>, data: &[u8]) -> Vec<Type> {
  let mut next = 0u32;
  let mut fresh = |n: &mut u32| {
    let var = Variable(*n);
    *n += 1;
    var
  };

  let mut last: Option<Variable> = None;
  for &byte in data {
    let out = fresh(&mut next);
    match byte % 6 {
      0 => typer.analyze(&Op::LoadInteger(i64::from(byte)), &[], &[out]),
      1 => typer.analyze(&Op::LoadString(String::from("s")), &[], &[out]),
      2 => typer.analyze(&Op::LoadBoolean(byte & 1 == 0), &[], &[out]),
      3 => typer.analyze(&Op::CreateObject { property_names: vec![String::from("p")] }, &[], &[out]),
      4 => match last {
        Some(prev) => typer.analyze(&Op::BinaryOperation(BinaryOperator::Add), &[prev, prev], &[out]),
        None => typer.analyze(&Op::LoadNull, &[], &[out]),
      },
      _ => match last {
        Some(prev) => typer.analyze(&Op::GetProperty(String::from("p")), &[prev], &[out]),
        None => typer.analyze(&Op::LoadUndefined, &[], &[out]),
      },
    }
    last = Some(out);
  }

  (0..next).map(|n| typer.type_of(Variable(n))).collect()
}
