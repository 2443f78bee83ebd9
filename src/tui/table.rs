//! Generic table widget state: sorting, filtering, selection tracking.

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Integer(i64),
    String(String),
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Trait for table row items.
pub trait TableRow: Clone {
    /// Unique identifier for selection tracking.
    fn id(&self) -> u64;

    /// Number of columns.
    fn column_count() -> usize;

    /// Column headers.
    fn headers() -> Vec<&'static str>;

    /// Cell values as strings.
    fn cells(&self) -> Vec<String>;

    /// Sort key for the specified column.
    fn sort_key(&self, column: usize) -> SortKey;

    /// Check if item matches the filter.
    fn matches_filter(&self, filter: &str) -> bool;
}

/// State for a table widget.
#[derive(Debug, Clone)]
pub struct TableState<T: TableRow> {
    /// All items (unfiltered).
    pub items: Vec<T>,
    /// Selected row index (in filtered view).
    pub selected: usize,
    /// Sort column index.
    pub sort_column: usize,
    /// Sort direction (true = ascending).
    pub sort_ascending: bool,
    /// Filter string.
    pub filter: Option<String>,
    /// Tracked entity ID — follows the selected row across sort/filter changes.
    pub tracked_id: Option<u64>,
}

impl<T: TableRow> Default for TableState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> TableState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            sort_column: 0,
            sort_ascending: true, // Host order first
            filter: None,
            tracked_id: None,
        }
    }

    /// Replaces items, keeping the current sort and the tracked selection.
    pub fn update(&mut self, new_items: Vec<T>) {
        self.items = new_items;
        self.apply_sort();
        self.resolve_selection();
    }

    /// Returns filtered and sorted items.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| {
                self.filter
                    .as_ref()
                    .map(|f| item.matches_filter(f))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Currently selected item, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.filtered_items().get(self.selected).copied()
    }

    /// Applies current sort to items.
    fn apply_sort(&mut self) {
        let col = self.sort_column;
        let asc = self.sort_ascending;

        self.items.sort_by(|a, b| {
            let key_a = a.sort_key(col);
            let key_b = b.sort_key(col);
            let cmp = key_a
                .partial_cmp(&key_b)
                .unwrap_or(std::cmp::Ordering::Equal);
            if asc { cmp } else { cmp.reverse() }
        });
    }

    /// Cycles to next sort column.
    pub fn next_sort_column(&mut self) {
        self.sort_column = (self.sort_column + 1) % T::column_count();
        self.apply_sort();
        self.resolve_selection();
    }

    /// Toggles sort direction.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
        self.apply_sort();
        self.resolve_selection();
    }

    /// Sets filter string.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.selected = 0;
        self.tracked_id = None;
    }

    /// Moves selection up.
    pub fn select_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.tracked_id = None;
        }
    }

    /// Moves selection down.
    pub fn select_down(&mut self) {
        let max = self.filtered_items().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
            self.tracked_id = None;
        }
    }

    /// Moves selection up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        self.tracked_id = None;
    }

    /// Moves selection down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        let max = self.filtered_items().len().saturating_sub(1);
        self.selected = (self.selected + page_size).min(max);
        self.tracked_id = None;
    }

    /// Resolves selection by tracked entity ID.
    /// If the tracked entity is found in the current filtered items, moves
    /// `selected` to its new index. If not found, clears `tracked_id` and
    /// clamps `selected`. Always updates `tracked_id` from the current row.
    pub fn resolve_selection(&mut self) {
        let ids: Vec<u64> = self.filtered_items().iter().map(|item| item.id()).collect();
        let len = ids.len();
        if len == 0 {
            self.selected = 0;
            self.tracked_id = None;
            return;
        }

        if let Some(tid) = self.tracked_id {
            if let Some(pos) = ids.iter().position(|&id| id == tid) {
                self.selected = pos;
            } else {
                // Entity disappeared — clamp selection
                self.tracked_id = None;
                if self.selected >= len {
                    self.selected = len - 1;
                }
            }
        } else if self.selected >= len {
            self.selected = len - 1;
        }

        if let Some(&id) = ids.get(self.selected) {
            self.tracked_id = Some(id);
        }
    }
}
