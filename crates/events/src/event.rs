/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts about a state transition)
/// - **versioned** (observers may persist or forward them)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "cart.item_added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32 {
        1
    }
}
