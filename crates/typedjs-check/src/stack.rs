//! Stack growth for deeply nested documents

/// Grows the stack when less than 128KB remains, 1MB at a time
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(128 * 1024, 1024 * 1024, f)
}
