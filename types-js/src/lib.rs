#![deny(missing_debug_implementations)]

//! JavaScript type lattice.
//!
//! A [`Type`] is a union value: a bitset over the disjoint primitive atoms
//! plus at most one [`ObjectShape`] describing the object component of the
//! union (named properties and methods, an optional nominal group, optional
//! call/construct signatures). Types are immutable plain data with value
//! equality; shapes are shared behind `Arc` so clones stay cheap.
//!
//! Two combination operators coexist deliberately:
//! - [`Type::union`] (`|`) is the lattice join used when control-flow paths
//!   merge: shapes meet structurally, keeping only shared members.
//! - [`Type::merging`] (`+`) accumulates constraints when building composite
//!   values, e.g. a class value is its static shape merged with a construct
//!   signature returning the instance shape.
//!
//! # Example
//! ```
//! use types_js::Type;
//!
//! let merged = Type::string() | Type::float();
//! assert!(Type::string().is(&merged));
//! assert!(merged.may_be(&Type::primitive()));
//! ```

mod display;
#[cfg(feature = "fuzzing")]
mod fuzz;
mod signature;
mod types;

#[cfg(feature = "fuzzing")]
pub use fuzz::fuzz_lattice;
pub use signature::Param;
pub use signature::Signature;
pub use types::ObjectShape;
pub use types::Type;
pub use types::TypeBits;
