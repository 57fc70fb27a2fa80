use glam::Vec2;

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Clamps `value` into `[min, max]`.
/// Unlike `f32::clamp` this never panics on a reversed range, `min` wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Clamps into the range of a color channel
pub fn clamp_channel(value: f32) -> f32 {
    clamp(value, 0.0, 255.0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(-1.0, 2.0), Vec2::new(-1.0, 2.0)), 0.0);
        assert_eq!(
            distance(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0)),
            distance(Vec2::new(4.0, 5.0), Vec2::new(1.0, 1.0))
        );
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-3.0, 0.0, 255.0), 0.0);
        assert_eq!(clamp(300.0, 0.0, 255.0), 255.0);
        assert_eq!(clamp(42.5, 0.0, 255.0), 42.5);
        assert_eq!(clamp_channel(1000.0), 255.0);
    }
}
