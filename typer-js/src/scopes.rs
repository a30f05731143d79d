//! Per-scope variable state, stacked by lexical block.
//!
//! Variable introductions always land in the root frame (the builder
//! numbers variables globally and never reuses them), while reassignments
//! land in the active frame. Popping a frame yields the reassignments that
//! may escape it; sibling diffs are merged back with union, optionally
//! widened by the pre-block type when the block may not have executed.

use crate::ir::Variable;
use ahash::AHashMap;
use ahash::AHashSet;
use types_js::Type;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
  Root,
  Conditional,
  Loop,
  SwitchCase,
  Function,
  ClassBody,
  ClassMethod,
  ClassStatic,
  ClassStaticInitializer,
  ObjectLiteral,
  Try,
  Catch,
  Finally,
}

#[derive(Debug)]
struct Frame {
  kind: BlockKind,
  bindings: AHashMap<Variable, Type>,
  reassigned: AHashSet<Variable>,
  defined: AHashSet<Variable>,
}

impl Frame {
  fn new(kind: BlockKind) -> Frame {
    Frame {
      kind,
      bindings: AHashMap::new(),
      reassigned: AHashSet::new(),
      defined: AHashSet::new(),
    }
  }
}

/// The escaping effect of a popped frame: every variable it reassigned that
/// was born outside it, with the final type it held when the frame closed.
#[derive(Debug)]
pub struct FrameDiff {
  pub kind: BlockKind,
  pub assignments: AHashMap<Variable, Type>,
}

#[derive(Debug)]
pub struct ScopeStack {
  frames: Vec<Frame>,
}

impl ScopeStack {
  pub fn new() -> ScopeStack {
    ScopeStack {
      frames: vec![Frame::new(BlockKind::Root)],
    }
  }

  pub fn reset(&mut self) {
    self.frames.clear();
    self.frames.push(Frame::new(BlockKind::Root));
  }

  pub fn depth(&self) -> usize {
    self.frames.len()
  }

  pub fn push(&mut self, kind: BlockKind) {
    self.frames.push(Frame::new(kind));
  }

  pub fn pop(&mut self) -> FrameDiff {
    assert!(self.frames.len() > 1, "left more blocks than were entered");
    let frame = self.frames.pop().unwrap();
    let mut assignments = AHashMap::new();
    for var in frame.reassigned.iter() {
      if !frame.defined.contains(var) {
        assignments.insert(*var, frame.bindings[var].clone());
      }
    }
    // Variables born in the popped frame stay invisible to every enclosing
    // merge as well.
    self
      .frames
      .last_mut()
      .unwrap()
      .defined
      .extend(frame.defined.iter().copied());
    FrameDiff {
      kind: frame.kind,
      assignments,
    }
  }

  pub fn get(&self, var: Variable) -> Option<&Type> {
    self
      .frames
      .iter()
      .rev()
      .find_map(|frame| frame.bindings.get(&var))
  }

  /// Introduce a variable with its producer's result type.
  pub fn define(&mut self, var: Variable, ty: Type) {
    debug_assert!(
      !self.frames[0].bindings.contains_key(&var),
      "variable {var:?} introduced twice"
    );
    self.frames[0].bindings.insert(var, ty);
    self.frames.last_mut().unwrap().defined.insert(var);
  }

  /// Reassign a variable in the active frame.
  pub fn set(&mut self, var: Variable, ty: Type) {
    let top = self.frames.last_mut().unwrap();
    top.bindings.insert(var, ty);
    top.reassigned.insert(var);
  }

  /// Merge sibling diffs into the active frame. Each variable's merged type
  /// is the union of every sibling's final type, further unioned with the
  /// pre-block type when `include_pre` is set (the construct may skip all
  /// siblings) or when some sibling did not assign the variable. Merged
  /// writes count as reassignments here so they keep propagating outward.
  pub fn merge_branches(&mut self, diffs: &[FrameDiff], include_pre: bool) {
    let mut vars: Vec<Variable> = Vec::new();
    let mut seen: AHashSet<Variable> = AHashSet::new();
    for diff in diffs {
      for var in diff.assignments.keys() {
        if seen.insert(*var) {
          vars.push(*var);
        }
      }
    }

    for var in vars {
      let mut merged: Option<Type> = None;
      let mut skipped_by_some = false;
      for diff in diffs {
        match diff.assignments.get(&var) {
          Some(ty) => {
            merged = Some(match merged {
              Some(acc) => acc.union(ty),
              None => ty.clone(),
            });
          }
          None => skipped_by_some = true,
        }
      }
      let mut merged = merged.unwrap();
      if include_pre || skipped_by_some {
        if let Some(pre) = self.get(var) {
          merged = merged.union(pre);
        }
      }
      self.set(var, merged);
    }
  }
}

impl Default for ScopeStack {
  fn default() -> ScopeStack {
    ScopeStack::new()
  }
}
