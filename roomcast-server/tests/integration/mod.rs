pub mod signaling_tests;

use tracing::Level;

use roomcast_core::RoomId;
use roomcast_server::CoordinatorHandle;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_coordinator() -> CoordinatorHandle {
    CoordinatorHandle::spawn(16)
}

/// Spawn a coordinator and create one room in it.
pub async fn create_test_room(name: &str) -> (CoordinatorHandle, RoomId) {
    let coordinator = create_test_coordinator();
    let summary = coordinator
        .create_room(name)
        .await
        .expect("Failed to create room");
    (coordinator, summary.id)
}
