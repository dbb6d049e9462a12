//! Two-pointer window tracking over sorted time.
//!
//! This module maintains the half-open row range `[left, right)` of input rows
//! whose time lies within half-width of the current output time, updating it
//! incrementally as the output cursor advances.

// External dependencies
use core::ops::Range;
use num_traits::Float;

// Half-open window bounds `[left, right)` over the rows of a segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    // First row inside the window.
    pub left: usize,

    // One past the last row inside the window.
    pub right: usize,
}

impl Window {
    /// Start a fresh window at the beginning of a segment.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the window to output time `t` with half-width `half_width`.
    ///
    /// A row `i` is inside when `t - time[i] - eps <= half_width` and
    /// `time[i] - t - eps <= half_width`. For a fixed half-width and
    /// non-decreasing `t` only the forward loops move, so `left` and `right`
    /// never decrease. The retreat loops handle a half-width that grew since
    /// the previous point.
    #[inline]
    pub fn advance<T: Float>(&mut self, time: &[T], t: T, half_width: T, eps: T) {
        let n = time.len();
        self.left = self.left.min(n);
        self.right = self.right.min(n);

        while self.left < n && t - time[self.left] - eps > half_width {
            self.left += 1;
        }
        while self.left > 0 && t - time[self.left - 1] - eps <= half_width {
            self.left -= 1;
        }

        if self.right < self.left {
            self.right = self.left;
        }
        while self.right < n && time[self.right] - t - eps <= half_width {
            self.right += 1;
        }
        while self.right > self.left && time[self.right - 1] - t - eps > half_width {
            self.right -= 1;
        }
    }

    /// Compute the window for `t` from scratch by scanning every row.
    pub fn brute_force<T: Float>(time: &[T], t: T, half_width: T, eps: T) -> Self {
        let inside = |x: T| t - x - eps <= half_width && x - t - eps <= half_width;
        match time.iter().position(|&x| inside(x)) {
            None => {
                // Empty: park both pointers where the forward scan would stop
                let p = time.partition_point(|&x| t - x - eps > half_width);
                Self { left: p, right: p }
            }
            Some(left) => {
                let len = time[left..].iter().take_while(|&&x| inside(x)).count();
                Self {
                    left,
                    right: left + len,
                }
            }
        }
    }

    // Number of rows in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    // Check if the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Row range covered by the window.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }
}
