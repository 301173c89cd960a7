//! Stack capture.

use crate::stack::{Stack, StackFrame};

/// Path prefix of the unwinder's own frames, dropped before `skip` applies.
const BACKTRACE_MARKER: &str = "backtrace::";

/// Function name used when a symbol cannot be resolved.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Produces the current call stack, innermost first.
///
/// `skip` counts frames starting at the walker's own frame: `callers(0)`
/// includes the frame of `callers` itself, `callers(1)` starts at whoever
/// called it. Implementations never fail; an unresolvable stack is empty.
pub trait StackWalker: Send + Sync {
    fn callers(&self, skip: usize) -> Stack;
}

impl<F> StackWalker for F
where
    F: Fn(usize) -> Stack + Send + Sync,
{
    fn callers(&self, skip: usize) -> Stack {
        self(skip)
    }
}

/// Walks the live stack with the `backtrace` crate.
///
/// Inlined calls resolve to several symbols for one physical frame; each
/// symbol becomes its own [`StackFrame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceWalker;

impl StackWalker for BacktraceWalker {
    #[inline(never)]
    fn callers(&self, skip: usize) -> Stack {
        let mut frames = Vec::new();

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                frames.push(StackFrame {
                    file: symbol.filename().map(|p| p.display().to_string()),
                    line: symbol.lineno().unwrap_or(0),
                    function: symbol
                        .name()
                        .map(|name| format!("{:#}", name))
                        .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string()),
                });
            });
            true
        });

        // The unwinder's own frames sit above ours.
        frames
            .into_iter()
            .skip_while(|f| f.function.starts_with(BACKTRACE_MARKER))
            .skip(skip)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_walker() {
        let walker = |skip: usize| -> Stack {
            (0..4)
                .skip(skip)
                .map(|i| StackFrame::new("f.rs", i, format!("f{}", i)))
                .collect()
        };

        let stack = walker.callers(2);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].function, "f2");
    }

    #[test]
    fn test_backtrace_walker_starts_below_unwinder() {
        let stack = BacktraceWalker.callers(0);
        assert!(!stack.is_empty());
        assert!(!stack[0].function.starts_with(BACKTRACE_MARKER));
    }

    #[test]
    fn test_backtrace_walker_skip_shortens_stack() {
        let full = BacktraceWalker.callers(0).len();
        let skipped = BacktraceWalker.callers(2).len();
        assert_eq!(skipped + 2, full);
    }
}
