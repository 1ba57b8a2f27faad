//! Host capabilities injected into the editor.
//!
//! The editor calls back into its host for notifications (content changes, breakpoint
//! bookkeeping) and for optional services (debugger actions, hover text). Every method has a
//! no-op default so hosts only implement what they use.

/// Debugger actions a host can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugAction {
    /// Resume execution.
    Continue,
    /// Step into the next call.
    StepInto,
    /// Step over the next call.
    StepOver,
    /// Run until the current function returns.
    StepOut,
    /// Stop debugging.
    Stop,
}

/// Callbacks from the editor to its embedding application.
pub trait EditorHost {
    /// Called after any mutating operation changed the document.
    fn content_changed(&mut self) {}

    /// A breakpoint was added, moved to `line`, or changed.
    fn breakpoint_updated(&mut self, _line: usize, _condition: &str, _enabled: bool) {}

    /// The breakpoint at `line` no longer exists.
    fn breakpoint_removed(&mut self, _line: usize) {}

    /// The user asked the debugger to do something.
    fn debugger_action(&mut self, _action: DebugAction) {}

    /// The user asked the debugger to continue execution at `line`.
    fn debugger_jump(&mut self, _line: usize) {}

    /// Whether the host can describe `identifier` (e.g. a variable value while debugging).
    fn has_identifier_hover(&self, _identifier: &str) -> bool {
        false
    }

    /// Hover text for `identifier`.
    fn identifier_hover(&mut self, _identifier: &str) -> Option<String> {
        None
    }
}

/// A host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl EditorHost for NullHost {}
