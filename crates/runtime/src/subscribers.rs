/// Handle returned by [`Subscribers::subscribe`].
///
/// Owning the id is owning the subscription: passing it back to
/// [`Subscribers::unsubscribe`] is the disposer. The registry owner calls
/// [`Subscribers::clear`] on teardown so no listener outlives it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Deterministic listener registry.
///
/// Ordering contract:
/// - Listeners are notified in subscription order.
/// - Unsubscribing never perturbs the order of the remaining listeners.
pub struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns `true` if the registry changed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Invokes every listener with `value`, in subscription order.
    pub fn notify(&mut self, value: &T) {
        for (_, listener) in &mut self.entries {
            listener(value);
        }
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}
