use esp_hal::{
    gpio::{interconnect::PeripheralOutput, Input, InputConfig, Pull},
    ledc::{
        channel::{self, Channel, ChannelIFace},
        timer::{self, TimerIFace},
        LSGlobalClkSource, Ledc, LowSpeed,
    },
    time::Rate,
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use esp_println::println;

use super::super::{
    config::UART_BAUD,
    servo::ServoBank,
    types::{ControlContext, SwitchInputs},
};
use super::{control_task::control_task, serial_task::console_task};

const SERVO_PWM_HZ: u32 = 50;

pub(crate) fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = Uart::new(peripherals.UART0, uart_cfg)
        .expect("failed to init UART0")
        .with_rx(peripherals.GPIO3)
        .with_tx(peripherals.GPIO1)
        .into_async();

    let switches = SwitchInputs {
        primary: Input::new(peripherals.GPIO16, InputConfig::default().with_pull(Pull::Up)),
        secondary: Input::new(peripherals.GPIO17, InputConfig::default().with_pull(Pull::Up)),
    };

    let mut ledc = Ledc::new(peripherals.LEDC);
    let ledc = unsafe { make_static(&mut ledc) };
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    let mut pwm_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    pwm_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty14Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(SERVO_PWM_HZ),
        })
        .expect("failed to configure servo PWM timer");
    let pwm_timer = unsafe { make_static(&mut pwm_timer) };

    // Slot order follows ServoBank: thumb flex, thumb base, index,
    // middle, ring, pinky, wrist bend, wrist rotation.
    let servos = ServoBank::new([
        servo_channel(ledc, pwm_timer, channel::Number::Channel0, peripherals.GPIO32),
        servo_channel(ledc, pwm_timer, channel::Number::Channel1, peripherals.GPIO5),
        servo_channel(ledc, pwm_timer, channel::Number::Channel2, peripherals.GPIO25),
        servo_channel(ledc, pwm_timer, channel::Number::Channel3, peripherals.GPIO26),
        servo_channel(ledc, pwm_timer, channel::Number::Channel4, peripherals.GPIO23),
        servo_channel(ledc, pwm_timer, channel::Number::Channel5, peripherals.GPIO27),
        servo_channel(ledc, pwm_timer, channel::Number::Channel6, peripherals.GPIO21),
        servo_channel(ledc, pwm_timer, channel::Number::Channel7, peripherals.GPIO22),
    ]);

    let context = ControlContext { switches, servos };

    println!("gripctl boot: control loop + console starting");

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(control_task(context));
        spawner.must_spawn(console_task(uart));
    });
}

fn servo_channel<'d>(
    ledc: &Ledc<'d>,
    pwm_timer: &'static timer::Timer<'d, LowSpeed>,
    number: channel::Number,
    pin: impl PeripheralOutput<'d>,
) -> Channel<'d, LowSpeed> {
    let mut servo = ledc.channel(number, pin);
    servo
        .configure(channel::config::Config {
            timer: pwm_timer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .expect("failed to configure servo channel");
    servo
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}
