//! Orientation: the one decision that differs between the two scrollbars.

use std::fmt;

/// Which pointer coordinate drives the scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAxis {
    X,
    Y,
}

/// Which host dimension is the main (scrolling) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeAttr {
    Width,
    Height,
}

/// Which offset edge positions the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetAttr {
    Left,
    Top,
}

/// Everything an orientation decides, as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisDescriptor {
    pub pointer_axis: PointerAxis,
    pub size_attr: SizeAttr,
    pub offset_attr: OffsetAttr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const fn descriptor(self) -> AxisDescriptor {
        match self {
            Self::Horizontal => AxisDescriptor {
                pointer_axis: PointerAxis::X,
                size_attr: SizeAttr::Width,
                offset_attr: OffsetAttr::Left,
            },
            Self::Vertical => AxisDescriptor {
                pointer_axis: PointerAxis::Y,
                size_attr: SizeAttr::Height,
                offset_attr: OffsetAttr::Top,
            },
        }
    }

    /// The coordinate of `(x, y)` that lies on this axis.
    pub fn pick<T>(self, x: T, y: T) -> T {
        match self.descriptor().pointer_axis {
            PointerAxis::X => x,
            PointerAxis::Y => y,
        }
    }

    /// The main-axis entry of a `(width, height)` pair.
    pub fn main_extent<T>(self, width: T, height: T) -> T {
        match self.descriptor().size_attr {
            SizeAttr::Width => width,
            SizeAttr::Height => height,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}
