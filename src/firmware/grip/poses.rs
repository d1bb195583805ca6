use super::config::GRIP_CONFIG;
use super::types::ActuatorChannel;

/// Bitmask over `ActuatorChannel`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ChannelSet {
    bits: u8,
}

impl ChannelSet {
    pub(crate) const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub(crate) const fn with(self, channel: ActuatorChannel) -> Self {
        Self {
            bits: self.bits | (1 << channel.as_u8()),
        }
    }

    pub(crate) const fn contains(self, channel: ActuatorChannel) -> bool {
        self.bits & (1 << channel.as_u8()) != 0
    }

    pub(crate) const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }
}

/// Thumb-base handling for one action: optional pre-step floor and
/// ceiling (floor wins when both apply), then a signed per-tick step.
/// The step always runs, clamped or not, written to the servo or not.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ThumbBaseRule {
    pub(crate) floor: Option<i16>,
    pub(crate) ceiling: Option<i16>,
    pub(crate) step: i16,
}

impl ThumbBaseRule {
    pub(crate) fn apply_bounds(self, position: i16) -> i16 {
        let mut bounded = position;
        if let Some(floor) = self.floor {
            if bounded <= floor {
                bounded = floor;
            }
        }
        if let Some(ceiling) = self.ceiling {
            if bounded >= ceiling {
                bounded = ceiling;
            }
        }
        bounded
    }
}

/// One direction of one pose: which channels get written this tick and
/// how the thumb base moves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PoseAction {
    pub(crate) channels: ChannelSet,
    pub(crate) thumb_base: ThumbBaseRule,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PoseDefinition {
    pub(crate) label: &'static str,
    pub(crate) engage: PoseAction,
    pub(crate) release: PoseAction,
}

pub(crate) const POSE_COUNT: usize = 4;

/// The fixed pose table. Index 0 closes the whole hand; 1-3 trade
/// finger coverage for thumb-base travel. Pose 0 never writes the
/// thumb-base servo on engage but still walks its scalar back toward
/// the grip stop.
pub(crate) const POSE_TABLE: [PoseDefinition; POSE_COUNT] = [
    PoseDefinition {
        label: "full_grip",
        engage: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::Ring)
                .with(ActuatorChannel::Pinky)
                .with(ActuatorChannel::ThumbFlex),
            thumb_base: ThumbBaseRule {
                floor: Some(GRIP_CONFIG.thumb_base.grip_max),
                ceiling: None,
                step: -1,
            },
        },
        release: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::Ring)
                .with(ActuatorChannel::Pinky)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: None,
                ceiling: None,
                step: -1,
            },
        },
    },
    PoseDefinition {
        label: "pinch",
        engage: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: Some(GRIP_CONFIG.thumb_base.default_pos),
                ceiling: Some(GRIP_CONFIG.thumb_base.pinch_max),
                step: 1,
            },
        },
        release: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: None,
                ceiling: None,
                step: -1,
            },
        },
    },
    PoseDefinition {
        label: "tripod",
        engage: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: Some(GRIP_CONFIG.thumb_base.default_pos),
                ceiling: Some(GRIP_CONFIG.thumb_base.tripod_max),
                step: 1,
            },
        },
        release: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Index)
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: None,
                ceiling: None,
                step: -1,
            },
        },
    },
    PoseDefinition {
        label: "point",
        engage: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::Ring)
                .with(ActuatorChannel::Pinky)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: Some(GRIP_CONFIG.thumb_base.default_pos),
                ceiling: Some(GRIP_CONFIG.thumb_base.point_max),
                step: 1,
            },
        },
        release: PoseAction {
            channels: ChannelSet::empty()
                .with(ActuatorChannel::Middle)
                .with(ActuatorChannel::Ring)
                .with(ActuatorChannel::Pinky)
                .with(ActuatorChannel::ThumbFlex)
                .with(ActuatorChannel::ThumbBase),
            thumb_base: ThumbBaseRule {
                floor: None,
                ceiling: None,
                step: -1,
            },
        },
    },
];

/// The selector's cycle visits one index past the table (the neutral
/// index); that index has no definition and the hand sits still.
pub(crate) fn pose_for_index(index: u8) -> Option<&'static PoseDefinition> {
    POSE_TABLE.get(usize::from(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_index_has_no_definition() {
        assert!(pose_for_index(POSE_COUNT as u8).is_none());
        assert!(pose_for_index(u8::MAX).is_none());
    }

    #[test]
    fn full_grip_engage_skips_thumb_base_write_but_steps_it() {
        let pose = pose_for_index(0).unwrap();
        assert!(!pose.engage.channels.contains(ActuatorChannel::ThumbBase));
        assert_eq!(pose.engage.thumb_base.step, -1);
        assert!(pose.release.channels.contains(ActuatorChannel::ThumbBase));
    }

    #[test]
    fn engage_bounds_raise_to_default_and_cap_at_pose_max() {
        let pinch = pose_for_index(1).unwrap();
        assert_eq!(pinch.engage.thumb_base.apply_bounds(20), 30);
        assert_eq!(pinch.engage.thumb_base.apply_bounds(35), 35);
        assert_eq!(pinch.engage.thumb_base.apply_bounds(55), 40);

        let point = pose_for_index(3).unwrap();
        assert_eq!(point.engage.thumb_base.apply_bounds(120), 90);
    }

    #[test]
    fn release_is_unbounded_on_every_pose() {
        for pose in &POSE_TABLE {
            assert!(pose.release.thumb_base.floor.is_none());
            assert!(pose.release.thumb_base.ceiling.is_none());
            assert_eq!(pose.release.thumb_base.step, -1);
        }
    }

    #[test]
    fn channel_sets_match_pose_shapes() {
        let widths: [(usize, usize); POSE_COUNT] = [(5, 6), (3, 3), (4, 4), (5, 5)];
        for (pose, (engage_len, release_len)) in POSE_TABLE.iter().zip(widths) {
            assert_eq!(pose.engage.channels.len(), engage_len, "{}", pose.label);
            assert_eq!(pose.release.channels.len(), release_len, "{}", pose.label);
        }
    }
}
