//! Stack growth guard for Kiln's recursive passes.
//!
//! The parser, binder and both evaluators walk expressions recursively, so a
//! long chain like `1 + 1 + 1 + ...` or deeply parenthesized input can exhaust
//! the native stack. Every recursive entry point wraps its body in
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! - **Red zone**: 64KB. Below this much remaining stack we grow.
//! - **Growth size**: 1MB per segment.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
