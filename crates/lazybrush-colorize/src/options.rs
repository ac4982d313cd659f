//! Labeling options

/// How strongly a scribble anchors its covered cells to its label
///
/// Anchors are scaled against the capacity reference `k = 2 * (W + H)`,
/// the cost of cutting across roughly one canvas worth of blank pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScribbleWeight {
    /// 5% of `k` per covered pixel. Scribbles guide the cut but only
    /// hold regions the line art encloses; on open canvas a small
    /// scribble can be overrun by a neighboring label or the implicit
    /// surrounding.
    Soft,
    /// `k` per covered pixel. Scribbled regions keep their label even
    /// with no line art around them.
    #[default]
    Hard,
}

impl ScribbleWeight {
    /// Terminal capacity contributed by one covered pixel
    pub(crate) fn per_area_weight(self, k: i32) -> i32 {
        match self {
            ScribbleWeight::Soft => 5 * k / 100,
            ScribbleWeight::Hard => k,
        }
    }
}

/// Options for [`colorize`](crate::colorize)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorizeOptions {
    /// Label everything not claimed by a scribble as
    /// [`Label::IMPLICIT_SURROUNDING`](lazybrush_core::Label), modeling
    /// an unbounded background around the canvas
    pub use_implicit_surrounding: bool,

    /// Strength of the scribble data term
    pub scribble_weight: ScribbleWeight,
}
