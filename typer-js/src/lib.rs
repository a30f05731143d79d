#![deny(missing_debug_implementations)]

//! Forward type inference over an incrementally built JavaScript IR.
//!
//! A program builder appends operations one at a time and reports each to
//! [`Typer::analyze`] together with its input and output variables; after
//! every operation the inferred [`Type`](types_js::Type) of any variable is
//! queryable through [`Typer::type_of`]. Block structure (control flow,
//! function bodies, class and object-literal definitions) arrives as
//! paired `Begin…`/`End…` operations, so the engine never looks ahead.
//!
//! The engine is a best-effort approximation used to guide code
//! generation, not a checker: it never fails on strange programs, it only
//! widens. Variable state is kept per lexical block and merged at block
//! exits with union, including the pre-block state whenever a block may not
//! execute (conditionals, loops, bodies that may never be called).
//!
//! Knowledge about the host (builtins, well-known property and method
//! types) comes from an [`Environment`] supplied at construction.
//!
//! # Example
//! ```
//! use typer_js::{Op, StaticEnvironment, Typer, Variable};
//! use types_js::Type;
//!
//! let mut typer = Typer::new(StaticEnvironment::new());
//! let v = Variable(0);
//! typer.analyze(&Op::LoadInteger(42), &[], &[v]);
//! assert_eq!(typer.type_of(v), Type::integer());
//! ```

mod class_typing;
mod env;
#[cfg(feature = "fuzzing")]
mod fuzz;
mod ir;
mod object_literal;
mod scopes;
mod typer;

pub use env::Environment;
pub use env::PrimitiveTypes;
pub use env::StaticEnvironment;
#[cfg(feature = "fuzzing")]
pub use fuzz::fuzz_typer;
pub use ir::BinaryOperator;
pub use ir::Comparator;
pub use ir::Op;
pub use ir::UnaryOperator;
pub use ir::Variable;
pub use typer::Typer;
