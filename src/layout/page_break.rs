//! # Page Break Decisions
//!
//! Blocks in the itinerary template are never split: a block either fits in
//! what is left of the page or moves whole to the next one. The only
//! exception is a block taller than an entire page, which is placed at the
//! top of a fresh page and allowed to run into the footer band rather than
//! paging forever.

/// What to do with a block before drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Draw the block where the cursor is.
    Place,
    /// Start a new page and draw the block at its top margin.
    MoveToNextPage,
    /// The block doesn't fit even on an empty page. Draw it here anyway.
    Oversized,
}

/// Decide where a block of `needed` height goes, given the space left above
/// the footer reserve. `at_page_top` is true when the cursor sits at the top
/// margin of a page, so moving would gain nothing.
pub fn decide_break(remaining_height: f64, needed: f64, at_page_top: bool) -> BreakDecision {
    if needed <= remaining_height {
        BreakDecision::Place
    } else if at_page_top {
        BreakDecision::Oversized
    } else {
        BreakDecision::MoveToNextPage
    }
}
