use core::sync::atomic::{AtomicBool, AtomicI8};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use super::grip::GripTraceSample;

pub(crate) const CONTROL_TICK_MS: u64 = 20;
pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const CONSOLE_CMD_BUF_LEN: usize = 96;

/// Grip tracing is off at boot and toggled from the console; samples
/// are throttled in the control task so the console stream cannot
/// starve the UART.
pub(crate) const GRIP_TRACE_DEFAULT_ON: bool = false;
pub(crate) const GRIP_TRACE_SAMPLE_INTERVAL_MS: u64 = 100;

pub(crate) static GRIP_TRACE_ENABLED: AtomicBool = AtomicBool::new(GRIP_TRACE_DEFAULT_ON);
pub(crate) static GRIP_TRACE_SAMPLES: Channel<CriticalSectionRawMutex, GripTraceSample, 8> =
    Channel::new();

// Wrist nudge directions (-1/0/1), set by the console and read once
// per control tick.
pub(crate) static WRIST_BEND_DIRECTION: AtomicI8 = AtomicI8::new(0);
pub(crate) static WRIST_ROTATION_DIRECTION: AtomicI8 = AtomicI8::new(0);
