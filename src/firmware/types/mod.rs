use esp_hal::gpio::Input;
use esp_hal::uart::Uart;
use esp_hal::Async;

use super::servo::ServoBank;

pub(crate) type SerialUart = Uart<'static, Async>;

/// The two toe-switch input pins, active low with pull-ups.
pub(crate) struct SwitchInputs {
    pub(crate) primary: Input<'static>,
    pub(crate) secondary: Input<'static>,
}

/// Everything the control task owns: the polled inputs and the servo
/// outputs.
pub(crate) struct ControlContext {
    pub(crate) switches: SwitchInputs,
    pub(crate) servos: ServoBank<'static>,
}
