pub(crate) mod config;
mod controller;
mod convergence;
mod gesture;
pub(crate) mod poses;
mod trace;
pub(crate) mod types;

#[allow(unused_imports)]
pub(crate) use controller::{GripController, TickOutput};
#[allow(unused_imports)]
pub(crate) use convergence::{ConvergencePositions, ConvergenceSummary, PoseConvergenceEngine};
#[allow(unused_imports)]
pub(crate) use gesture::{GestureModeSelector, GestureOutput};
#[allow(unused_imports)]
pub(crate) use trace::GripTraceSample;
#[allow(unused_imports)]
pub(crate) use types::{
    ActuatorChannel, GestureStateId, GripEvent, GripEventBuffer, ServoCommand, ServoCommandBuffer,
    SwitchFrame, SwitchId, SwitchSample,
};
