//! Linux OS integration: evdev device discovery, the uinput-backed
//! pointer/button sink, and the poll-driven tap timer.

pub mod device;
pub mod timer;
