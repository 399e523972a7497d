use crate::services::ClassStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ClassStore,
}
