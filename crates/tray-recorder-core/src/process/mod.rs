mod handle;
mod supervisor;

pub use {
    handle::{HandleId, ProcessExit, ProcessHandle},
    supervisor::{ProcessSupervisor, STOP_TOKEN, Spawner},
};
