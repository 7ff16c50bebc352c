use crate::coordinator::CoordinatorHandle;

/// Shared axum state: the only way handlers reach room state is through the coordinator.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: CoordinatorHandle,
}

impl AppState {
    pub fn new(coordinator: CoordinatorHandle) -> Self {
        Self { coordinator }
    }
}
