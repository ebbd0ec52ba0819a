// ── Reactive data store ──
//
// Ordered device storage with push-based change notification.

mod collection;
mod device_store;

pub use collection::DeviceCollection;
pub use device_store::DeviceStore;
