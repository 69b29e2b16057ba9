use foundation::bounds::Aabb2;
use registry::Feature;

/// Seam to the map collaborator.
///
/// The engine calls these on a successful search (frame the hit, open its
/// attribute panel) and on click events; the collaborator owns everything
/// visual beyond the per-feature `current_style` it reads back out of the
/// registry.
pub trait ViewSink {
    fn frame_to(&mut self, bounds: Aabb2);
    fn open_info_panel(&mut self, layer_id: &str, feature: &Feature);
}

/// For callers with no renderer attached (headless use, tests).
#[derive(Debug, Default)]
pub struct NullSink;

impl ViewSink for NullSink {
    fn frame_to(&mut self, _bounds: Aabb2) {}

    fn open_info_panel(&mut self, _layer_id: &str, _feature: &Feature) {}
}
