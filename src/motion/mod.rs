//! Spring interpolation for animated dot transitions.

mod spring;
mod transition;

pub use spring::{
    DEFAULT_DAMPING, DEFAULT_PRECISION, DEFAULT_STIFFNESS, FRAME_SECONDS, MAX_STEPS_PER_TICK,
    Spring, SpringConfig,
};
pub use transition::{
    DotTarget, DotsTransition, EnterTransition, InterpolatedDot, LeaveTransition,
    TransitionPhase,
};
