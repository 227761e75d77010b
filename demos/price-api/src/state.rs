/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async tracker SDK instance. Handles dispatching blocking SDK
    /// operations to a thread pool internally.
    pub sdk: tcgtracker_sdk::AsyncTrackerSdk,
}
