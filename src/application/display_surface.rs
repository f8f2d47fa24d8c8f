// Display surface seam - accepts the full ordered series and redraws
use crate::domain::display::DisplayPoint;
use crate::domain::window::Window;

pub trait DisplaySurface: Send + Sync {
    /// Replace whatever is on screen with `points` for `window`. The
    /// sequence arrives already ordered; partial updates never happen.
    fn render(&self, window: Window, points: &[DisplayPoint]);
}
