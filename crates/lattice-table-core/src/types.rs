//! Hint types passed along with list updates.

/// The animation a list widget should use for an incremental update.
///
/// The manager never interprets this value; it is forwarded verbatim to the
/// widget together with the delta it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAnimation {
    /// Rows fade in or out.
    Fade,
    /// Rows slide in from, or out to, the right.
    Right,
    /// Rows slide in from, or out to, the left.
    Left,
    /// Rows slide in from, or out to, the top.
    Top,
    /// Rows slide in from, or out to, the bottom.
    Bottom,
    /// No animation.
    None,
    /// The widget keeps the row centered while it appears or disappears.
    Middle,
    /// The widget picks an appropriate animation.
    #[default]
    Automatic,
}

/// Where a row should end up after a programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollPosition {
    /// Scroll the minimum distance that makes the row visible.
    #[default]
    None,
    /// Align the row with the top of the visible area.
    Top,
    /// Center the row in the visible area.
    Middle,
    /// Align the row with the bottom of the visible area.
    Bottom,
}

/// The editing control shown next to a row in editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditingStyle {
    /// No editing control.
    None,
    /// A delete control.
    #[default]
    Delete,
    /// An insert control.
    Insert,
}

/// An axis-aligned rectangle in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a rectangle from its origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
