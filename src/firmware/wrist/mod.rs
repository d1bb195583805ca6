/// Wrist bend and rotation: two independent single-servo step loops,
/// deliberately outside the grip core. Each tick with a non-neutral
/// direction writes the current position and then steps it, clamped to
/// the axis's calibrated travel.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WristAxis {
    Bend,
    Rotation,
}

impl WristAxis {
    /// Maps the console's -1/0/1 direction onto the servo's travel.
    /// Bending down and rotating left both raise the servo angle on
    /// this linkage.
    pub(crate) fn nudge_for(self, direction: i8) -> WristNudge {
        match (self, direction) {
            (Self::Bend, -1) | (Self::Rotation, 1) => WristNudge::Plus,
            (Self::Bend, 1) | (Self::Rotation, -1) => WristNudge::Minus,
            _ => WristNudge::Hold,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WristNudge {
    Hold,
    Plus,
    Minus,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct WristAxisConfig {
    pub(crate) min_pos: i16,
    pub(crate) max_pos: i16,
    pub(crate) step: i16,
}

pub(crate) const BEND_CONFIG: WristAxisConfig = WristAxisConfig {
    min_pos: 10,
    max_pos: 40,
    step: 2,
};

pub(crate) const ROTATION_CONFIG: WristAxisConfig = WristAxisConfig {
    min_pos: 30,
    max_pos: 130,
    step: 2,
};

pub(crate) struct WristActuator {
    config: &'static WristAxisConfig,
    position: i16,
}

impl WristActuator {
    /// Starts at the middle of the travel range.
    pub(crate) const fn new(config: &'static WristAxisConfig) -> Self {
        Self {
            config,
            position: (config.min_pos + config.max_pos) / 2,
        }
    }

    pub(crate) fn position(&self) -> i16 {
        self.position
    }

    /// Returns the position to command this tick, or None when holding.
    /// Write-then-step like the grip engine; the clamp pair is
    /// asymmetric (strictly-above on the ceiling, at-or-below on the
    /// floor), matching the calibrated stops of the linkage.
    pub(crate) fn tick(&mut self, nudge: WristNudge) -> Option<i16> {
        match nudge {
            WristNudge::Hold => None,
            WristNudge::Plus => {
                let commanded = self.position;
                self.position += self.config.step;
                if self.position > self.config.max_pos {
                    self.position = self.config.max_pos;
                }
                Some(commanded)
            }
            WristNudge::Minus => {
                let commanded = self.position;
                self.position -= self.config.step;
                if self.position <= self.config.min_pos {
                    self.position = self.config.min_pos;
                }
                Some(commanded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_mid_travel() {
        assert_eq!(WristActuator::new(&BEND_CONFIG).position(), 25);
        assert_eq!(WristActuator::new(&ROTATION_CONFIG).position(), 80);
    }

    #[test]
    fn hold_commands_nothing() {
        let mut wrist = WristActuator::new(&BEND_CONFIG);
        assert_eq!(wrist.tick(WristNudge::Hold), None);
        assert_eq!(wrist.position(), 25);
    }

    #[test]
    fn plus_steps_up_and_caps_at_max() {
        let mut wrist = WristActuator::new(&BEND_CONFIG);
        for _ in 0..20 {
            let _ = wrist.tick(WristNudge::Plus);
        }
        assert_eq!(wrist.position(), BEND_CONFIG.max_pos);
        assert_eq!(wrist.tick(WristNudge::Plus), Some(BEND_CONFIG.max_pos));
        assert_eq!(wrist.position(), BEND_CONFIG.max_pos);
    }

    #[test]
    fn minus_floor_clamp_engages_at_the_bound() {
        let mut wrist = WristActuator::new(&ROTATION_CONFIG);
        for _ in 0..40 {
            let _ = wrist.tick(WristNudge::Minus);
        }
        assert_eq!(wrist.position(), ROTATION_CONFIG.min_pos);
        // The floor comparison is at-or-below: stepping exactly onto
        // the bound already pins it.
        let mut near_floor = WristActuator::new(&ROTATION_CONFIG);
        while near_floor.position() > ROTATION_CONFIG.min_pos + 2 {
            let _ = near_floor.tick(WristNudge::Minus);
        }
        let _ = near_floor.tick(WristNudge::Minus);
        assert_eq!(near_floor.position(), ROTATION_CONFIG.min_pos);
    }

    #[test]
    fn command_trails_position_by_one_step() {
        let mut wrist = WristActuator::new(&ROTATION_CONFIG);
        assert_eq!(wrist.tick(WristNudge::Plus), Some(80));
        assert_eq!(wrist.position(), 82);
        assert_eq!(wrist.tick(WristNudge::Plus), Some(82));
    }

    #[test]
    fn console_direction_mapping_is_per_axis() {
        assert_eq!(WristAxis::Bend.nudge_for(-1), WristNudge::Plus);
        assert_eq!(WristAxis::Bend.nudge_for(1), WristNudge::Minus);
        assert_eq!(WristAxis::Rotation.nudge_for(1), WristNudge::Plus);
        assert_eq!(WristAxis::Rotation.nudge_for(-1), WristNudge::Minus);
        assert_eq!(WristAxis::Bend.nudge_for(0), WristNudge::Hold);
    }
}
