use std::fmt;

use crate::config::GizmoMode;
use crate::math::Transform;

/// Notifications emitted by the controls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlEvent {
    /// Something visible changed: the hovered axis, the placement or the configuration.
    Change,
    /// A drag started on a handle.
    MouseDown,
    /// A drag on a handle ended.
    MouseUp { mode: GizmoMode },
    /// The attached object's transform was changed by a drag.
    ObjectChange { transform: Transform },
}

/// Handle of a registered listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ControlEvent)>;

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct EventDispatcher {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl EventDispatcher {
    pub fn add(&mut self, listener: impl FnMut(&ControlEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if no listener with this id is registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&mut self, event: &ControlEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::default();

        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            dispatcher.add(move |event| log.borrow_mut().push((name, *event)));
        }
        dispatcher.emit(&ControlEvent::MouseDown);

        assert_eq!(
            *log.borrow(),
            vec![("first", ControlEvent::MouseDown), ("second", ControlEvent::MouseDown)]
        );
    }

    #[test]
    fn removal_releases_exactly_the_registered_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::default();

        let counter = Rc::clone(&count);
        let id = dispatcher.add(move |_| *counter.borrow_mut() += 1);
        let other = dispatcher.add(|_| {});

        assert!(dispatcher.remove(id));
        assert!(!dispatcher.remove(id));
        assert_eq!(dispatcher.len(), 1);

        dispatcher.emit(&ControlEvent::Change);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(Rc::strong_count(&count), 1);

        assert!(dispatcher.remove(other));
        assert_eq!(dispatcher.len(), 0);
    }
}
