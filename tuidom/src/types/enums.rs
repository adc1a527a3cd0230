/// A length along one axis, resolved against the parent's size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Take all of the parent's remaining space.
    #[default]
    Fill,
    /// A fixed number of cells.
    Cells(u16),
    /// A percentage (0-100) of the parent's size.
    Percent(f32),
}

impl Length {
    pub fn resolve(self, available: u16) -> u16 {
        match self {
            Self::Fill => available,
            Self::Cells(n) => n.min(available),
            Self::Percent(p) => {
                let p = if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 };
                (available as f32 * p / 100.0).round() as u16
            }
        }
    }
}
