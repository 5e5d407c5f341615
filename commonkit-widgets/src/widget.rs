//! Types shared by every widget: identifiers, visibility and events.

/// Opaque identifier for a widget owned by the host UI layer.
pub type WidgetId = u64;

/// Handle returned by [`Event::add`].
pub type HandlerId = u64;

/// How a widget participates in layout, rendering and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Rendered and hit-testable
    #[default]
    Visible,
    /// Not rendered and takes no layout space
    Collapsed,
    /// Not rendered but still takes layout space
    Hidden,
    /// Rendered; neither it nor its children receive hits
    HitTestInvisible,
    /// Rendered; children receive hits but it does not
    SelfHitTestInvisible,
}

impl Visibility {
    /// True if the widget is drawn.
    pub fn is_visible(self) -> bool {
        !matches!(self, Visibility::Collapsed | Visibility::Hidden)
    }

    /// True if the widget itself can receive pointer hits.
    pub fn is_hit_testable(self) -> bool {
        self == Visibility::Visible
    }
}

type Handler<A> = Box<dyn FnMut(&A)>;

/// A multicast event with typed arguments.
///
/// Handlers run synchronously in registration order and must not re-enter
/// the widget that owns the event.
pub struct Event<A> {
    next_id: HandlerId,
    handlers: Vec<(HandlerId, Handler<A>)>,
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            handlers: Vec::new(),
        }
    }

    pub fn add<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&A) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if `id` was not registered.
    pub fn remove(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    pub fn broadcast(&mut self, args: &A) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(args);
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
