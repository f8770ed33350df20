//! Column count and greedy shortest-column placement.
//!
//! These are the pure forms of the engine's layout steps. The engine itself
//! measures live column heights through the host, and its output must agree
//! with [`greedy_assign`] whenever the host measures a column as the sum of
//! its items.

/// Number of columns for a given width: `ceil(width / min_column_width)`,
/// never less than one.
pub fn column_count(width: u32, min_column_width: u32) -> usize {
    if min_column_width == 0 {
        return 1;
    }
    width.div_ceil(min_column_width).max(1) as usize
}

/// Indices of `heights` ordered tallest first. Equal heights keep their
/// original relative order.
pub fn sort_by_height_desc(heights: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..heights.len()).collect();
    order.sort_by(|&a, &b| heights[b].cmp(&heights[a]));
    order
}

/// Index of the shortest column. Ties go to the lowest index.
///
/// Returns `None` for an empty slice.
pub fn shortest_column(heights: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, &height) in heights.iter().enumerate() {
        match best {
            Some((_, h)) if height >= h => {},
            _ => best = Some((index, height)),
        }
    }
    best.map(|(index, _)| index)
}

/// Place items, in the given order, into `columns` columns. Each item goes
/// to the column with the smallest accumulated height.
///
/// Returns the item indices held by each column, in placement order.
pub fn greedy_assign(heights: &[u32], columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut assignment = vec![Vec::new(); columns];
    let mut totals = vec![0u32; columns];
    for (item, &height) in heights.iter().enumerate() {
        // `totals` is never empty.
        let col = shortest_column(&totals).unwrap_or(0);
        assignment[col].push(item);
        totals[col] = totals[col].saturating_add(height);
    }
    assignment
}
