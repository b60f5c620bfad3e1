// ============================================================================
// pulse-cells - Cell Context
// Thread-local state shared by every cell on the thread
// ============================================================================

use std::cell::Cell;

// =============================================================================
// CELL CONTEXT
// =============================================================================

/// Thread-local context holding the key allocator.
///
/// Subscriber and edge keys come from one monotonic counter per thread, so a
/// key identifies its registration across every cell on the thread and is
/// never reused. Cells themselves are single-threaded (`Rc`-based), so a
/// plain `Cell<u64>` is sufficient.
pub struct CellContext {
    /// Next key handed out to a subscriber or a propagation edge
    next_key: Cell<u64>,
}

impl CellContext {
    fn new() -> Self {
        Self {
            next_key: Cell::new(1),
        }
    }

    /// Hand out a fresh key. Keys start at 1; 0 is never minted.
    pub fn mint_key(&self) -> u64 {
        let key = self.next_key.get();
        self.next_key.set(key + 1);
        key
    }

    /// How many keys this thread has minted so far.
    pub fn keys_minted(&self) -> u64 {
        self.next_key.get() - 1
    }
}

impl Default for CellContext {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static CONTEXT: CellContext = CellContext::new();
}

/// Run a closure with access to the thread-local context.
pub fn with_context<R>(f: impl FnOnce(&CellContext) -> R) -> R {
    CONTEXT.with(|ctx| f(ctx))
}

/// Mint a fresh key from the thread-local allocator.
pub(crate) fn mint_key() -> u64 {
    with_context(|ctx| ctx.mint_key())
}

// =============================================================================
// TESTS
// =============================================================================
