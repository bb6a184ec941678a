/// How the dashboard grid picks its first visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ScrollMode {
    /// Scroll just enough to keep the selection on screen.
    #[default]
    Follow,
    /// Put the selected row in the middle of the viewport.
    Center,
}

/// Number of rows needed for `len` cards laid out `columns` wide.
pub(crate) fn row_count(len: usize, columns: usize) -> usize {
    let cols = columns.max(1);
    len.div_ceil(cols)
}

/// First row to draw so that `selected_row` is visible. `previous_top` is
/// the first row of the last frame; `Follow` keeps it while the selection is
/// still inside the viewport.
pub(crate) fn first_visible_row(
    previous_top: usize,
    selected_row: usize,
    visible_rows: usize,
    total_rows: usize,
    mode: ScrollMode,
) -> usize {
    let capacity = visible_rows.max(1);
    let max_start = total_rows.saturating_sub(capacity);
    let start = match mode {
        ScrollMode::Follow => {
            if selected_row < previous_top {
                selected_row
            } else if selected_row >= previous_top + capacity {
                selected_row + 1 - capacity
            } else {
                previous_top
            }
        }
        ScrollMode::Center => selected_row.saturating_sub(capacity / 2),
    };
    start.min(max_start)
}

/// Move `selected` by `offset` cards, staying put when that leaves the grid.
pub(crate) fn step(selected: usize, offset: isize, len: usize) -> usize {
    let new_index = selected as isize + offset;
    if (0..len as isize).contains(&new_index) {
        new_index as usize
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_up() {
        assert_eq!(row_count(0, 3), 0);
        assert_eq!(row_count(3, 3), 1);
        assert_eq!(row_count(4, 3), 2);
        assert_eq!(row_count(4, 0), 4);
    }

    #[test]
    fn follow_scrolls_minimally() {
        assert_eq!(first_visible_row(0, 0, 3, 10, ScrollMode::Follow), 0);
        assert_eq!(first_visible_row(0, 2, 3, 10, ScrollMode::Follow), 0);
        assert_eq!(first_visible_row(0, 3, 3, 10, ScrollMode::Follow), 1);
        assert_eq!(first_visible_row(0, 9, 3, 10, ScrollMode::Follow), 7);
    }

    #[test]
    fn follow_keeps_viewport_while_selection_fits() {
        // Moving up from the bottom row only moves the highlight.
        assert_eq!(first_visible_row(7, 8, 3, 10, ScrollMode::Follow), 7);
        assert_eq!(first_visible_row(7, 7, 3, 10, ScrollMode::Follow), 7);
        assert_eq!(first_visible_row(7, 6, 3, 10, ScrollMode::Follow), 6);
        // A shrunken list pulls the viewport back.
        assert_eq!(first_visible_row(7, 1, 3, 2, ScrollMode::Follow), 0);
    }

    #[test]
    fn center_puts_selection_mid_viewport() {
        assert_eq!(first_visible_row(0, 5, 3, 10, ScrollMode::Center), 4);
        assert_eq!(first_visible_row(0, 5, 5, 10, ScrollMode::Center), 3);
        // Clamped at both ends.
        assert_eq!(first_visible_row(4, 0, 5, 10, ScrollMode::Center), 0);
        assert_eq!(first_visible_row(0, 9, 5, 10, ScrollMode::Center), 5);
        assert_eq!(first_visible_row(0, 1, 5, 2, ScrollMode::Center), 0);
    }

    #[test]
    fn step_stays_inside_grid() {
        assert_eq!(step(0, -1, 4), 0);
        assert_eq!(step(0, 1, 4), 1);
        assert_eq!(step(1, 3, 4), 1);
        assert_eq!(step(3, -3, 4), 0);
        assert_eq!(step(0, 1, 0), 0);
    }
}
