#![allow(dead_code)]

use typer_js::Environment;
use typer_js::Op;
use typer_js::StaticEnvironment;
use typer_js::Typer;
use typer_js::Variable;
use types_js::Type;

/// Minimal stand-in for the program builder: numbers variables and feeds
/// operations to the engine in order.
pub struct Program<E: Environment> {
  pub typer: Typer<E>,
  next: u32,
}

impl Program<StaticEnvironment> {
  pub fn new() -> Program<StaticEnvironment> {
    Program::with_env(StaticEnvironment::new())
  }
}

impl<E: Environment> Program<E> {
  pub fn with_env(env: E) -> Program<E> {
    Program {
      typer: Typer::new(env),
      next: 0,
    }
  }

  pub fn reset(&mut self) {
    self.typer.reset();
    self.next = 0;
  }

  fn fresh(&mut self) -> Variable {
    let var = Variable(self.next);
    self.next += 1;
    var
  }

  /// Emit an operation producing exactly one output.
  pub fn op(&mut self, op: Op, inputs: &[Variable]) -> Variable {
    let out = self.fresh();
    self.typer.analyze(&op, inputs, &[out]);
    out
  }

  /// Emit an operation producing `n` outputs (parameter bindings etc.).
  pub fn op_n(&mut self, op: Op, inputs: &[Variable], n: usize) -> Vec<Variable> {
    let outs: Vec<Variable> = (0..n).map(|_| self.fresh()).collect();
    self.typer.analyze(&op, inputs, &outs);
    outs
  }

  /// Emit an operation with no outputs.
  pub fn stmt(&mut self, op: Op, inputs: &[Variable]) {
    self.typer.analyze(&op, inputs, &[]);
  }

  pub fn load_int(&mut self, value: i64) -> Variable {
    self.op(Op::LoadInteger(value), &[])
  }

  pub fn load_float(&mut self, value: f64) -> Variable {
    self.op(Op::LoadFloat(value.into()), &[])
  }

  pub fn load_string(&mut self, value: &str) -> Variable {
    self.op(Op::LoadString(value.to_string()), &[])
  }

  pub fn load_bool(&mut self, value: bool) -> Variable {
    self.op(Op::LoadBoolean(value), &[])
  }

  pub fn reassign(&mut self, to: Variable, from: Variable) {
    self.stmt(Op::Reassign, &[to, from]);
  }

  pub fn ty(&self, var: Variable) -> Type {
    self.typer.type_of(var)
  }
}
