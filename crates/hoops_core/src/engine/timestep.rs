/// timestep.rs
/// Fixed simulation rate: one tick per rendered frame.

/// Ticks per simulated second
pub const TICKS_PER_SECOND: u32 = 60;

/// Seconds advanced per tick
pub const DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Convert seconds to a whole number of ticks (rounded up)
#[inline]
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds * TICKS_PER_SECOND as f32).ceil().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_consistency() {
        assert_eq!(TICKS_PER_SECOND, 60);
        assert!((DT * 60.0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(1.0), 60);
        assert_eq!(seconds_to_ticks(5.0), 300);
        assert_eq!(seconds_to_ticks(0.0), 0);
    }
}
