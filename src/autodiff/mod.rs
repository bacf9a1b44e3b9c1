//! autodiff — explicit reverse-mode differentiation tape.
//!
//! Purpose
//! -------
//! Provide the graph that gradient-aware evaluators (such as
//! [`hurwitz_zeta_var`](crate::special::hurwitz::hurwitz_zeta_var)) write
//! into, and the backward pass that turns it into gradients.
//!
//! Conventions
//! -----------
//! - The tape is always an explicit `&mut Tape` argument. Its lifecycle is
//!   owned by the caller: create it before the forward pass, call
//!   [`Tape::gradient`] to backpropagate, and [`Tape::clear`] (or drop it)
//!   between independent evaluations.
//! - Errors are reported as [`TapeError`]; nothing here panics on misuse.

pub mod errors;
pub mod tape;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{TapeError, TapeResult};
pub use self::tape::{Gradients, Tape, Var};
