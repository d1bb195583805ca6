mod bootstrap;
mod control_task;
mod serial_task;

pub use bootstrap::run;
