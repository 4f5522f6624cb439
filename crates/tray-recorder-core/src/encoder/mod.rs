mod exit;
mod invocation;

pub use {
    exit::ExitOutcome,
    invocation::{DEFAULT_FRAMERATE, EncoderInvocation},
};
