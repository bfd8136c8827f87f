use quickagenda_core::MemoryEventStore;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub store: MemoryEventStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
