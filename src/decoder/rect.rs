/// Bounding box in left/top/width/height form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge x coordinate
    pub left: f32,
    /// Top edge y coordinate
    pub top: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from left/top coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a Rect from corner format (x1, y1, x2, y2).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            left: x1,
            top: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to corner format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        ]
    }

    /// Convert to TLWH format: (left, top, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.left, self.top, self.width, self.height]
    }

    /// Clip every field independently into `[0, max_x]` (left, width) and
    /// `[0, max_y]` (top, height).
    ///
    /// NaN clips to the upper bound. A negative bound clips to 0.
    pub fn clipped(&self, max_x: f32, max_y: f32) -> Self {
        Self {
            left: clip(self.left, max_x),
            top: clip(self.top, max_y),
            width: clip(self.width, max_x),
            height: clip(self.height, max_y),
        }
    }
}

#[inline]
fn clip(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}
