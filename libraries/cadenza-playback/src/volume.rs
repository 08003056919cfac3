//! Volume control with mute/unmute.

/// Volume level restored on unmute when no previous level is known.
const UNMUTE_FALLBACK: f32 = 0.5;

/// Output volume, 0.0–1.0, with mute remembering the previous level.
#[derive(Debug, Clone)]
pub struct Volume {
    level: f32,
    previous: f32,
}

impl Volume {
    /// Create a volume at the given level.
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            previous: 0.1,
        }
    }

    /// Current level, 0.0–1.0.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Set the level (clamped).
    pub fn set(&mut self, level: f32) {
        self.level = level.clamp(0.0, 1.0);
    }

    /// Whether output is muted.
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Mute, or restore the pre-mute level.
    pub fn toggle_mute(&mut self) {
        if self.level > 0.0 {
            self.previous = self.level;
            self.level = 0.0;
        } else {
            self.level = if self.previous > 0.0 {
                self.previous
            } else {
                UNMUTE_FALLBACK
            };
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps() {
        let mut volume = Volume::default();
        volume.set(1.7);
        assert_eq!(volume.level(), 1.0);
        volume.set(-0.2);
        assert_eq!(volume.level(), 0.0);
    }

    #[test]
    fn mute_restores_previous_level() {
        let mut volume = Volume::new(0.8);
        volume.toggle_mute();
        assert!(volume.is_muted());

        volume.toggle_mute();
        assert_eq!(volume.level(), 0.8);
    }

    #[test]
    fn unmute_from_zero_uses_fallback() {
        let mut volume = Volume::new(0.0);
        volume.toggle_mute();
        assert_eq!(volume.level(), 0.1);
    }
}
