//! Adaptive width fitting for tables.
//!
//! A column's footprint is its content width plus one space of padding on
//! each side. Borders are not counted.

/// Columns at or below this width are never shrunk
pub const MIN_SHRINK_WIDTH: usize = 10;

/// Outcome of fitting a table into a width budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthFit {
    /// Width per kept column
    pub widths: Vec<usize>,
    /// Indices of dropped columns, in declared order
    pub dropped: Vec<usize>,
}

fn footprint(widths: &[usize]) -> usize {
    widths.iter().map(|w| w + 2).sum()
}

/// Fit column widths into `max_width`; `0` means unlimited
///
/// `floors[i]` is the narrowest width column `i` may be shrunk to, or `None`
/// when its values must not be truncated. Shrinking walks from the rightmost
/// column; if that is not enough, columns are dropped from the right. The
/// first column is always kept.
pub fn fit_to_width(widths: &[usize], floors: &[Option<usize>], max_width: usize) -> WidthFit {
    let mut widths = widths.to_vec();
    if max_width == 0 || footprint(&widths) <= max_width {
        return WidthFit {
            widths,
            dropped: Vec::new(),
        };
    }

    for i in (0..widths.len()).rev() {
        let total = footprint(&widths);
        if total <= max_width {
            break;
        }
        if let Some(floor) = floors.get(i).copied().flatten() {
            let floor = floor.max(MIN_SHRINK_WIDTH);
            if widths[i] > floor {
                widths[i] -= (total - max_width).min(widths[i] - floor);
            }
        }
    }

    let mut kept = widths.len();
    while kept > 1 && footprint(&widths[..kept]) > max_width {
        kept -= 1;
    }
    let dropped = (kept..widths.len()).collect();
    widths.truncate(kept);

    WidthFit { widths, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_without_changes() {
        let fit = fit_to_width(&[5; 5], &[Some(1); 5], 50);
        assert_eq!(fit.widths, vec![5; 5]);
        assert!(fit.dropped.is_empty());
    }

    #[test]
    fn test_unlimited_width() {
        let fit = fit_to_width(&[80, 80], &[None, None], 0);
        assert_eq!(fit.widths, vec![80, 80]);
    }

    #[test]
    fn test_drops_trailing_columns() {
        let fit = fit_to_width(&[5; 5], &[Some(1); 5], 21);
        assert_eq!(fit.widths, vec![5, 5, 5]);
        assert_eq!(fit.dropped, vec![3, 4]);
    }

    #[test]
    fn test_shrinks_rightmost_before_dropping() {
        // footprints 12 + 32 = 44; shrinking the second column by 4 fits 40
        let fit = fit_to_width(&[10, 30], &[Some(2), Some(4)], 40);
        assert_eq!(fit.widths, vec![10, 26]);
        assert!(fit.dropped.is_empty());
    }

    #[test]
    fn test_shrink_respects_floor_then_drops() {
        let fit = fit_to_width(&[10, 30], &[Some(2), Some(4)], 20);
        assert_eq!(fit.widths, vec![10]);
        assert_eq!(fit.dropped, vec![1]);
    }

    #[test]
    fn test_untruncatable_column_is_dropped_not_shrunk() {
        let fit = fit_to_width(&[10, 30], &[Some(2), None], 40);
        assert_eq!(fit.widths, vec![10]);
        assert_eq!(fit.dropped, vec![1]);
    }

    #[test]
    fn test_first_column_always_kept() {
        let fit = fit_to_width(&[50], &[None], 10);
        assert_eq!(fit.widths, vec![50]);
        assert!(fit.dropped.is_empty());
    }
}
