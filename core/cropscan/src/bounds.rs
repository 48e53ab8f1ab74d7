/// Inclusive bounding box of the foreground pixels, in pixel coordinates.
///
/// `top`/`bottom` are row indices and `left`/`right` are column indices. A box
/// built through this type always satisfies `top <= bottom` and `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// First row containing a foreground pixel.
    pub top: u32,
    /// Last column containing a foreground pixel.
    pub right: u32,
    /// Last row containing a foreground pixel.
    pub bottom: u32,
    /// First column containing a foreground pixel.
    pub left: u32,
}

impl BoundingBox {
    /// A 1x1 box around the pixel at column `x`, row `y`.
    pub fn from_point(x: u32, y: u32) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    /// Widen the box so it also covers column `x`, row `y`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
        self.left = self.left.min(x);
        self.right = self.right.max(x);
    }

    /// Widen the box to cover the pixels `left..=right` on row `y`.
    pub(crate) fn include_span(&mut self, left: u32, right: u32, y: u32) {
        self.include(left, y);
        self.include(right, y);
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.top <= other.top
            && self.left <= other.left
            && self.bottom >= other.bottom
            && self.right >= other.right
    }

    /// Number of columns covered, counting both edges.
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Number of rows covered, counting both edges.
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// The `[top, right, bottom, left]` record form.
    pub fn to_record(&self) -> [u32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}
