//! Per-line annotations (breakpoints and error markers) and their renumbering rules.
//!
//! Structural edits report what happened to each breakpoint as a list of [`BreakpointEvent`]s;
//! the editor forwards them to its host.

use std::collections::BTreeMap;

/// Error messages keyed by zero-based line.
pub type ErrorMarkers = BTreeMap<usize, String>;

/// A breakpoint on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    /// Zero-based line.
    pub line: usize,
    /// Whether the debugger should stop here.
    pub enabled: bool,
    /// Optional condition expression (empty when unconditional).
    pub condition: String,
}

/// What happened to a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointEvent {
    /// Added, moved to, or changed at this state.
    Updated(Breakpoint),
    /// The breakpoint previously at this line is gone.
    Removed(usize),
}

/// Breakpoints in insertion order, at most one per line.
#[derive(Debug, Clone, Default)]
pub struct Breakpoints {
    items: Vec<Breakpoint>,
}

impl Breakpoints {
    /// Iterate over all breakpoints.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.items.iter()
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Breakpoint on `line`, if any.
    pub fn get(&self, line: usize) -> Option<&Breakpoint> {
        self.items.iter().find(|bp| bp.line == line)
    }

    /// Add or replace the breakpoint on `line`.
    pub(crate) fn add(
        &mut self,
        line: usize,
        condition: &str,
        enabled: bool,
    ) -> Vec<BreakpointEvent> {
        let mut events = Vec::new();
        if self.remove(line).is_some() {
            events.push(BreakpointEvent::Removed(line));
        }
        let bp = Breakpoint {
            line,
            enabled,
            condition: condition.to_string(),
        };
        events.push(BreakpointEvent::Updated(bp.clone()));
        self.items.push(bp);
        events
    }

    /// Remove the breakpoint on `line`.
    pub(crate) fn remove(&mut self, line: usize) -> Option<Breakpoint> {
        let pos = self.items.iter().position(|bp| bp.line == line)?;
        Some(self.items.remove(pos))
    }

    /// Change a breakpoint in place and return its new state.
    pub(crate) fn modify(
        &mut self,
        line: usize,
        f: impl FnOnce(&mut Breakpoint),
    ) -> Option<Breakpoint> {
        let bp = self.items.iter_mut().find(|bp| bp.line == line)?;
        f(bp);
        Some(bp.clone())
    }

    pub(crate) fn clear(&mut self) -> Vec<BreakpointEvent> {
        self.items
            .drain(..)
            .map(|bp| BreakpointEvent::Removed(bp.line))
            .collect()
    }

    /// `count` lines were inserted at `index`.
    pub(crate) fn lines_inserted(&mut self, index: usize, count: usize) -> Vec<BreakpointEvent> {
        let mut events = Vec::new();
        if count == 0 {
            return events;
        }
        for bp in self.items.iter_mut().filter(|bp| bp.line >= index) {
            events.push(BreakpointEvent::Removed(bp.line));
            bp.line += count;
            events.push(BreakpointEvent::Updated(bp.clone()));
        }
        events
    }

    /// Lines `start..end` were removed.
    pub(crate) fn lines_removed(&mut self, start: usize, end: usize) -> Vec<BreakpointEvent> {
        let mut events = Vec::new();
        if start >= end {
            return events;
        }
        let count = end - start;
        self.items.retain(|bp| {
            let doomed = (start..end).contains(&bp.line);
            if doomed {
                events.push(BreakpointEvent::Removed(bp.line));
            }
            !doomed
        });
        for bp in self.items.iter_mut().filter(|bp| bp.line >= end) {
            events.push(BreakpointEvent::Removed(bp.line));
            bp.line -= count;
            events.push(BreakpointEvent::Updated(bp.clone()));
        }
        events
    }
}

/// Shift error markers for `count` lines inserted at `index`.
pub(crate) fn markers_lines_inserted(markers: &mut ErrorMarkers, index: usize, count: usize) {
    if count == 0 {
        return;
    }
    let moved = markers.split_off(&index);
    markers.extend(moved.into_iter().map(|(line, msg)| (line + count, msg)));
}

/// Drop error markers on lines `start..end` and shift the ones below.
pub(crate) fn markers_lines_removed(markers: &mut ErrorMarkers, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let mut tail = markers.split_off(&start);
    let below = tail.split_off(&end);
    markers.extend(below.into_iter().map(|(line, msg)| (line - (end - start), msg)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(bps: &Breakpoints) -> Vec<usize> {
        bps.iter().map(|bp| bp.line).collect()
    }

    #[test]
    fn test_insert_shifts_breakpoints_at_or_below() {
        let mut bps = Breakpoints::default();
        bps.add(2, "", true);
        bps.add(5, "x > 1", false);

        let events = bps.lines_inserted(3, 1);
        assert_eq!(lines(&bps), vec![2, 6]);
        assert_eq!(
            events,
            vec![
                BreakpointEvent::Removed(5),
                BreakpointEvent::Updated(Breakpoint {
                    line: 6,
                    enabled: false,
                    condition: "x > 1".to_string()
                }),
            ]
        );
    }

    #[test]
    fn test_remove_drops_breakpoints_in_range() {
        let mut bps = Breakpoints::default();
        bps.add(1, "", true);
        bps.add(3, "", true);
        bps.add(7, "", true);

        let events = bps.lines_removed(2, 5);
        assert_eq!(lines(&bps), vec![1, 4]);
        assert_eq!(events[0], BreakpointEvent::Removed(3));
        assert_eq!(events[1], BreakpointEvent::Removed(7));
        assert!(matches!(&events[2], BreakpointEvent::Updated(bp) if bp.line == 4));
    }

    #[test]
    fn test_add_replaces_existing() {
        let mut bps = Breakpoints::default();
        bps.add(4, "a", true);
        let events = bps.add(4, "b", false);
        assert_eq!(bps.len(), 1);
        assert_eq!(bps.get(4).map(|bp| bp.condition.as_str()), Some("b"));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_error_markers_renumber() {
        let mut markers = ErrorMarkers::new();
        markers.insert(0, "a".into());
        markers.insert(2, "b".into());
        markers.insert(4, "c".into());

        markers_lines_inserted(&mut markers, 1, 2);
        assert_eq!(markers.keys().copied().collect::<Vec<_>>(), vec![0, 4, 6]);

        markers_lines_removed(&mut markers, 3, 5);
        assert_eq!(markers.keys().copied().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(markers.get(&4).map(String::as_str), Some("c"));
    }
}
