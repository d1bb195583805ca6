use esp_hal::ledc::channel::{Channel, ChannelHW};
use esp_hal::ledc::LowSpeed;

use super::grip::{ActuatorChannel, ServoCommandBuffer};
use super::wrist::WristAxis;

/// Fire-and-forget position sink for one servo channel. No
/// acknowledgment and no error surface; out-of-range positions are
/// clamped at the sink.
pub(crate) trait ActuatorSink {
    fn write(&mut self, channel: ActuatorChannel, position: i16);
}

pub(crate) const SERVO_SLOT_COUNT: usize = 8;

const SERVO_DUTY_BITS: u32 = 14;
const SERVO_PERIOD_US: u32 = 20_000;
const SERVO_MIN_PULSE_US: u32 = 500;
const SERVO_MAX_PULSE_US: u32 = 2_500;
const SERVO_MAX_DEGREES: i16 = 180;

/// LEDC duty for a servo angle: 50 Hz frame, 500-2500 us pulse across
/// 0-180 degrees at 14-bit resolution.
fn duty_for_degrees(degrees: i16) -> u32 {
    let clamped = degrees.clamp(0, SERVO_MAX_DEGREES) as u32;
    let span_us = SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US;
    let pulse_us = SERVO_MIN_PULSE_US + span_us * clamped / SERVO_MAX_DEGREES as u32;
    (pulse_us << SERVO_DUTY_BITS) / SERVO_PERIOD_US
}

/// The eight LEDC PWM channels driving the hand and wrist servos.
/// Slot order: the six `ActuatorChannel`s, then wrist bend, then wrist
/// rotation.
pub(crate) struct ServoBank<'d> {
    slots: [Channel<'d, LowSpeed>; SERVO_SLOT_COUNT],
}

impl<'d> ServoBank<'d> {
    pub(crate) fn new(slots: [Channel<'d, LowSpeed>; SERVO_SLOT_COUNT]) -> Self {
        Self { slots }
    }

    const fn hand_slot(channel: ActuatorChannel) -> usize {
        channel.as_u8() as usize
    }

    const fn wrist_slot(axis: WristAxis) -> usize {
        match axis {
            WristAxis::Bend => 6,
            WristAxis::Rotation => 7,
        }
    }

    fn write_slot(&mut self, slot: usize, position: i16) {
        self.slots[slot].set_duty_hw(duty_for_degrees(position));
    }

    pub(crate) fn write_wrist(&mut self, axis: WristAxis, position: i16) {
        self.write_slot(Self::wrist_slot(axis), position);
    }
}

impl ActuatorSink for ServoBank<'_> {
    fn write(&mut self, channel: ActuatorChannel, position: i16) {
        self.write_slot(Self::hand_slot(channel), position);
    }
}

/// Drains one tick's command buffer into the sink, preserving command
/// order, and reports how many writes went out.
pub(crate) fn flush_commands(sink: &mut impl ActuatorSink, commands: &ServoCommandBuffer) -> usize {
    for command in commands.iter() {
        sink.write(command.channel, command.position);
    }
    commands.len()
}
