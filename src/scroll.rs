//! Horizontal scroll synchronization between the detail panel and its
//! per-row name labels.
//!
//! The panel owns one [`ScrollSync`]. Every rendered row registers a handle
//! under its row index; a horizontal scroll of the panel records the offset
//! and pushes it to every registered handle so row labels stay pinned while
//! the cells move.

use tracing::trace;

/// Receiver of horizontal scroll offsets.
pub trait ScrollObserver {
    /// Repositions the row-name label for the given offset (pixels).
    fn update_row_name_offset(&mut self, offset: u32);
}

/// Whether a scroll event may bubble up to enclosing containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Scroll offset plus an index-addressable registry of row handles.
#[derive(Debug)]
pub struct ScrollSync<H> {
    offset: u32,
    handles: Vec<Option<H>>,
}

impl<H> Default for ScrollSync<H> {
    fn default() -> Self {
        Self {
            offset: 0,
            handles: Vec::new(),
        }
    }
}

impl<H: ScrollObserver> ScrollSync<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded horizontal offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Registers a handle for `row_index`, replacing any previous one.
    /// The handle immediately receives the current offset.
    pub fn register(&mut self, row_index: usize, mut handle: H) {
        if row_index >= self.handles.len() {
            self.handles.resize_with(row_index + 1, || None);
        }
        handle.update_row_name_offset(self.offset);
        self.handles[row_index] = Some(handle);
    }

    /// Removes the handle of `row_index`. Unknown indices are ignored.
    pub fn unregister(&mut self, row_index: usize) -> Option<H> {
        let handle = self.handles.get_mut(row_index).and_then(Option::take);
        while matches!(self.handles.last(), Some(None)) {
            self.handles.pop();
        }
        handle
    }

    /// Unregisters every handle at `len` or beyond.
    pub fn truncate(&mut self, len: usize) {
        self.handles.truncate(len);
        while matches!(self.handles.last(), Some(None)) {
            self.handles.pop();
        }
    }

    pub fn get(&self, row_index: usize) -> Option<&H> {
        self.handles.get(row_index).and_then(Option::as_ref)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| h.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `f` for every registered handle, in row order.
    pub fn for_each(&mut self, mut f: impl FnMut(usize, &mut H)) {
        for (idx, slot) in self.handles.iter_mut().enumerate() {
            if let Some(handle) = slot {
                f(idx, handle);
            }
        }
    }

    /// Records a horizontal scroll of the panel and forwards it to every handle.
    pub fn on_horizontal_scroll(&mut self, offset: u32) {
        trace!(offset, handles = self.len(), "horizontal scroll");
        self.offset = offset;
        self.for_each(|_, handle| handle.update_row_name_offset(offset));
    }

    /// Vertical scrolling of the row list stays local to the list and never
    /// touches the horizontal offset.
    pub fn on_vertical_scroll(&self) -> Propagation {
        Propagation::Stop
    }

    /// Drops every handle and resets the offset. Called on panel teardown.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Probe {
        received: Vec<u32>,
    }

    impl ScrollObserver for Probe {
        fn update_row_name_offset(&mut self, offset: u32) {
            self.received.push(offset);
        }
    }

    #[test]
    fn scroll_reaches_every_registered_handle() {
        let mut sync = ScrollSync::new();
        for idx in 0..4 {
            sync.register(idx, Probe::default());
        }
        sync.on_horizontal_scroll(120);

        assert_eq!(sync.offset(), 120);
        for idx in 0..4 {
            assert_eq!(sync.get(idx).unwrap().received.last(), Some(&120));
        }
    }

    #[test]
    fn unregistered_handle_is_skipped() {
        let mut sync = ScrollSync::new();
        for idx in 0..3 {
            sync.register(idx, Probe::default());
        }
        let removed = sync.unregister(1).unwrap();
        sync.on_horizontal_scroll(40);

        assert_eq!(removed.received, vec![0]);
        assert!(sync.get(1).is_none());
        assert_eq!(sync.len(), 2);
        assert_eq!(sync.get(0).unwrap().received, vec![0, 40]);
        assert_eq!(sync.get(2).unwrap().received, vec![0, 40]);

        // Unregistering twice or out of range is a no-op.
        assert!(sync.unregister(1).is_none());
        assert!(sync.unregister(99).is_none());
    }

    #[test]
    fn late_registration_receives_current_offset() {
        let mut sync = ScrollSync::new();
        sync.on_horizontal_scroll(60);
        sync.register(5, Probe::default());
        assert_eq!(sync.get(5).unwrap().received, vec![60]);
        assert_eq!(sync.len(), 1);
    }

    #[test]
    fn vertical_scroll_keeps_offset() {
        let mut sync: ScrollSync<Probe> = ScrollSync::new();
        sync.on_horizontal_scroll(80);
        assert_eq!(sync.on_vertical_scroll(), Propagation::Stop);
        assert_eq!(sync.offset(), 80);
    }

    #[test]
    fn truncate_and_clear() {
        let mut sync = ScrollSync::new();
        for idx in 0..5 {
            sync.register(idx, Probe::default());
        }
        sync.truncate(2);
        assert_eq!(sync.len(), 2);
        assert!(sync.get(2).is_none());

        sync.on_horizontal_scroll(20);
        sync.clear();
        assert!(sync.is_empty());
        assert_eq!(sync.offset(), 0);
    }

    #[test]
    fn for_each_visits_in_row_order() {
        let mut sync = ScrollSync::new();
        sync.register(2, Probe::default());
        sync.register(0, Probe::default());
        let mut seen = Vec::new();
        sync.for_each(|idx, _| seen.push(idx));
        assert_eq!(seen, vec![0, 2]);
    }
}
