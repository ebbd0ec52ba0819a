// ── Domain model ──

pub mod device;

pub use device::{BROADCAST, Device, PowerState, Scene, SceneId, Target};
