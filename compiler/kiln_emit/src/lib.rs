//! Compiled-method backend.
//!
//! A host-lowered block is translated into a routine for a small typed
//! stack machine modelled on CIL:
//!
//! 1. [`MethodFrame`] assigns every variable a local slot (slot 0 holds the
//!    boxed result), collects instructions, records label marks and
//!    pending jumps.
//! 2. [`compile`] walks the block and emits instructions.
//! 3. [`MethodFrame::finalize`] patches jumps, wraps the body with a
//!    prologue that unboxes each variable from the argument array and an
//!    epilogue that boxes it back, and computes the stack depth.
//! 4. [`HostMethod::run`] marshals a bindings map into that array, runs
//!    the routine, and copies every variable back.
//!
//! A finished [`HostMethod`] is immutable and can be run any number of
//! times.

mod emitter;
mod frame;
mod host_method;
mod machine;
mod opcode;

pub use emitter::compile;
pub use frame::{FramePhase, LocalType, MethodFrame, VariableDef};
pub use host_method::HostMethod;
pub use opcode::{IlType, OpCode};
