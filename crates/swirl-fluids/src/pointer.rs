use glam::Vec2;

/// Pointer state handed to the fluid for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer position this tick.
    pub position: Vec2,
    /// Pointer motion since the previous tick.
    pub displacement: Vec2,
}

/// Remembers the previous pointer sample so each tick can be given a displacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    previous: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this tick's pointer sample.
    ///
    /// The first sample after the pointer (re)appears has zero displacement. `None` means the
    /// pointer is absent and forgets the previous sample.
    pub fn update(&mut self, sample: Option<Vec2>) -> Option<PointerInput> {
        let Some(position) = sample.filter(|p| p.is_finite()) else {
            self.previous = None;
            return None;
        };

        let displacement = self.previous.map_or(Vec2::ZERO, |prev| position - prev);
        self.previous = Some(position);

        Some(PointerInput { position, displacement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_displacement() {
        let mut tracker = PointerTracker::new();
        let input = tracker.update(Some(Vec2::new(3.0, 4.0))).unwrap();
        assert_eq!(input.displacement, Vec2::ZERO);
    }

    #[test]
    fn displacement_is_frame_to_frame() {
        let mut tracker = PointerTracker::new();
        tracker.update(Some(Vec2::new(1.0, 1.0)));
        let input = tracker.update(Some(Vec2::new(4.0, -1.0))).unwrap();
        assert_eq!(input.position, Vec2::new(4.0, -1.0));
        assert_eq!(input.displacement, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn absence_forgets_previous_sample() {
        let mut tracker = PointerTracker::new();
        tracker.update(Some(Vec2::new(1.0, 1.0)));
        assert_eq!(tracker.update(None), None);

        let input = tracker.update(Some(Vec2::new(50.0, 50.0))).unwrap();
        assert_eq!(input.displacement, Vec2::ZERO);
    }

    #[test]
    fn non_finite_samples_count_as_absent() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.update(Some(Vec2::new(f32::NAN, 0.0))), None);
    }
}
