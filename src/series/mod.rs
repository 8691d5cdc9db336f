// ============================================================================
// Module : series
// ============================================================================
// Transformation pure des séries de prix en séries de rendu
// (mise à l'échelle, moyenne mobile, overlay des transactions, signal)
// ============================================================================

pub mod transform;

pub use transform::{
    moving_average, transform, DisplayOptions, OverlayPoint, OverlaySign, RenderSeries, Signal,
    DEFAULT_MOVING_AVERAGE_WINDOW, PREDICTION_MARKUP,
};
