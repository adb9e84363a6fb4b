/// A one-dimensional position along the track, in kilometres.
///
/// Positions are plain value types with a distance metric; a train's
/// position is replaced on movement, never mutated in place.
///
/// # Examples
///
/// ```
/// use traction_sim::sim::track::TrackPosition;
///
/// let a = TrackPosition::new(2.0);
/// let b = TrackPosition::new(7.5);
/// assert_eq!(a.distance_to(b), 5.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPosition {
    /// Distance from the track origin in km.
    pub km: f32,
}

impl TrackPosition {
    /// Creates a position at `km` kilometres from the track origin.
    pub fn new(km: f32) -> Self {
        Self { km }
    }

    /// Returns the absolute distance to `other` in km.
    ///
    /// Symmetric and non-negative for all real inputs.
    pub fn distance_to(self, other: TrackPosition) -> f32 {
        (self.km - other.km).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = TrackPosition::new(3.0);
        let b = TrackPosition::new(11.5);
        assert_eq!(a.distance_to(b), b.distance_to(a));
        assert_eq!(a.distance_to(b), 8.5);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = TrackPosition::new(42.0);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn distance_is_non_negative_for_negative_coordinates() {
        let a = TrackPosition::new(-4.0);
        let b = TrackPosition::new(2.0);
        assert_eq!(a.distance_to(b), 6.0);
        assert!(b.distance_to(a) >= 0.0);
    }
}
