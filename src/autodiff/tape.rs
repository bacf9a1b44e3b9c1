//! autodiff::tape — scalar reverse-mode differentiation tape.
//!
//! Purpose
//! -------
//! Record scalar computations as a linear arena of nodes and replay them in
//! reverse to obtain gradients via the chain rule. Functions whose local
//! derivative is computed by other means (e.g. by a second quadrature, as for
//! the Hurwitz zeta function) enter the graph as *precomputed-gradient* nodes
//! holding `(value, parent, ∂value/∂parent)`.
//!
//! Key behaviors
//! -------------
//! - [`Tape`] owns every node; callers thread `&mut Tape` through all
//!   differentiable code. There is no ambient, process-wide tape.
//! - [`Var`] is a cheap `Copy` handle `(value, index, tape_id)`.
//! - [`Tape::gradient`] performs one reverse sweep from an output and returns
//!   [`Gradients`] holding the adjoint of every node recorded before it.
//! - [`Tape::clear`] resets the arena between independent graph evaluations
//!   and issues a fresh tape id so stale handles are rejected.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nodes only reference nodes with smaller indices, so a single backward
//!   pass in index order is a valid topological traversal.
//! - Every operation checks that its operands carry this tape's id and a
//!   valid index; misuse returns [`TapeError`] instead of panicking.
//! - Floating-point exceptions (division by zero, `ln` of a negative value)
//!   follow IEEE semantics and are not reported as errors.
//!
//! Conventions
//! -----------
//! - Single writer: a tape is mutated through `&mut self` only and is not
//!   `Sync`-shared across threads by this crate.
//! - Constants are leaves like variables; their adjoints are computed but are
//!   usually ignored.
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::autodiff::errors::{TapeError, TapeResult};

static NEXT_TAPE_ID: AtomicUsize = AtomicUsize::new(1);

fn next_tape_id() -> usize {
    NEXT_TAPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a value recorded on a [`Tape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Var {
    value: f64,
    index: usize,
    tape_id: usize,
}

impl Var {
    /// Forward value of this node.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Position of this node in its tape's arena.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Id of the tape that recorded this node.
    pub fn tape_id(&self) -> usize {
        self.tape_id
    }
}

/// Local structure of one recorded operation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    /// Independent variable or constant.
    Leaf,
    /// One parent with a stored partial derivative.
    Unary { parent: usize, partial: f64 },
    /// Two parents with stored partial derivatives.
    Binary { lhs: usize, lhs_partial: f64, rhs: usize, rhs_partial: f64 },
}

/// Arena of recorded nodes for one differentiable computation.
#[derive(Debug)]
pub struct Tape {
    id: usize,
    nodes: Vec<Node>,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Create an empty tape with a fresh id.
    pub fn new() -> Self {
        Self { id: next_tape_id(), nodes: Vec::new() }
    }

    /// Create an empty tape with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { id: next_tape_id(), nodes: Vec::with_capacity(capacity) }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node and take a new id. Handles recorded before the call
    /// become foreign to this tape.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.id = next_tape_id();
    }

    // ---- Leaves ----

    /// Record an independent variable.
    pub fn variable(&mut self, value: f64) -> Var {
        self.push(value, Node::Leaf)
    }

    /// Record a constant. Identical to [`Tape::variable`] at the graph level.
    pub fn constant(&mut self, value: f64) -> Var {
        self.push(value, Node::Leaf)
    }

    // ---- Precomputed-gradient nodes ----

    /// Record `value = f(parent)` with a caller-supplied `∂f/∂parent`.
    pub fn precomputed(&mut self, value: f64, parent: Var, partial: f64) -> TapeResult<Var> {
        let parent = self.check(parent)?;
        Ok(self.push(value, Node::Unary { parent, partial }))
    }

    /// Record `value = f(lhs, rhs)` with caller-supplied partials.
    pub fn precomputed2(
        &mut self, value: f64, lhs: Var, lhs_partial: f64, rhs: Var, rhs_partial: f64,
    ) -> TapeResult<Var> {
        let lhs = self.check(lhs)?;
        let rhs = self.check(rhs)?;
        Ok(self.push(value, Node::Binary { lhs, lhs_partial, rhs, rhs_partial }))
    }

    // ---- Elementary operations ----

    pub fn add(&mut self, x: Var, y: Var) -> TapeResult<Var> {
        self.precomputed2(x.value + y.value, x, 1.0, y, 1.0)
    }

    pub fn sub(&mut self, x: Var, y: Var) -> TapeResult<Var> {
        self.precomputed2(x.value - y.value, x, 1.0, y, -1.0)
    }

    pub fn mul(&mut self, x: Var, y: Var) -> TapeResult<Var> {
        self.precomputed2(x.value * y.value, x, y.value, y, x.value)
    }

    pub fn div(&mut self, x: Var, y: Var) -> TapeResult<Var> {
        let value = x.value / y.value;
        self.precomputed2(value, x, 1.0 / y.value, y, -value / y.value)
    }

    pub fn neg(&mut self, x: Var) -> TapeResult<Var> {
        self.precomputed(-x.value, x, -1.0)
    }

    /// `c · x` for a plain constant `c`.
    pub fn scale(&mut self, x: Var, c: f64) -> TapeResult<Var> {
        self.precomputed(c * x.value, x, c)
    }

    /// `x + c` for a plain constant `c`.
    pub fn add_const(&mut self, x: Var, c: f64) -> TapeResult<Var> {
        self.precomputed(x.value + c, x, 1.0)
    }

    pub fn ln(&mut self, x: Var) -> TapeResult<Var> {
        self.precomputed(x.value.ln(), x, 1.0 / x.value)
    }

    pub fn exp(&mut self, x: Var) -> TapeResult<Var> {
        let value = x.value.exp();
        self.precomputed(value, x, value)
    }

    /// `x^p` for a plain constant exponent `p`.
    pub fn powf(&mut self, x: Var, p: f64) -> TapeResult<Var> {
        self.precomputed(x.value.powf(p), x, p * x.value.powf(p - 1.0))
    }

    // ---- Backpropagation ----

    /// Reverse sweep from `output`, seeding `∂output/∂output = 1`.
    ///
    /// # Errors
    /// - [`TapeError::ForeignVar`] / [`TapeError::IndexOutOfRange`] when
    ///   `output` was not recorded on this tape.
    pub fn gradient(&self, output: Var) -> TapeResult<Gradients> {
        let out = self.check(output)?;
        let mut adjoints = vec![0.0; out + 1];
        adjoints[out] = 1.0;
        for i in (0..=out).rev() {
            let upstream = adjoints[i];
            if upstream == 0.0 {
                continue;
            }
            match self.nodes[i] {
                Node::Leaf => {}
                Node::Unary { parent, partial } => {
                    adjoints[parent] += upstream * partial;
                }
                Node::Binary { lhs, lhs_partial, rhs, rhs_partial } => {
                    adjoints[lhs] += upstream * lhs_partial;
                    adjoints[rhs] += upstream * rhs_partial;
                }
            }
        }
        Ok(Gradients { tape_id: self.id, adjoints })
    }

    // ---- Helpers ----

    fn push(&mut self, value: f64, node: Node) -> Var {
        let index = self.nodes.len();
        self.nodes.push(node);
        Var { value, index, tape_id: self.id }
    }

    fn check(&self, var: Var) -> TapeResult<usize> {
        if var.tape_id != self.id {
            return Err(TapeError::ForeignVar {
                index: var.index,
                tape_id: var.tape_id,
                expected: self.id,
            });
        }
        if var.index >= self.nodes.len() {
            return Err(TapeError::IndexOutOfRange { index: var.index, len: self.nodes.len() });
        }
        Ok(var.index)
    }
}

/// Adjoints produced by one call to [`Tape::gradient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    tape_id: usize,
    adjoints: Vec<f64>,
}

impl Gradients {
    /// `∂output/∂var`. Nodes recorded after the output have zero adjoint.
    ///
    /// # Errors
    /// - [`TapeError::ForeignVar`] when `var` comes from another tape.
    pub fn wrt(&self, var: Var) -> TapeResult<f64> {
        if var.tape_id != self.tape_id {
            return Err(TapeError::ForeignVar {
                index: var.index,
                tape_id: var.tape_id,
                expected: self.tape_id,
            });
        }
        Ok(self.adjoints.get(var.index).copied().unwrap_or(0.0))
    }
}
