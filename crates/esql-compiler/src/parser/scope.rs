//! Per-scope method invocation counting.

use tracing::trace;

/// Counts method invocations inside the currently open nested construct.
///
/// Opening a scope saves the running count and starts from zero; closing it
/// folds the finished count back into the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodExprCounter {
    count: u32,
    stack: Vec<u32>,
}

impl MethodExprCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self) {
        self.stack.push(self.count);
        self.count = 0;
        trace!(depth = self.stack.len(), "enter method scope");
    }

    pub fn record_invocation(&mut self) {
        self.count += 1;
    }

    /// Closes the innermost scope and returns how many invocations it saw.
    pub fn exit_scope(&mut self) -> u32 {
        let finished = self.count;
        let parent = self.stack.pop().unwrap_or(0);
        self.count = parent + finished;
        trace!(depth = self.stack.len(), finished, "exit method scope");
        finished
    }

    /// Running count of the innermost open scope.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.stack.clear();
    }
}
