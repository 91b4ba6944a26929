//! Creation notifications
//!
//! Observers are owned by the [`SchemaCreation`](super::SchemaCreation)
//! instance they are registered on and run synchronously on the calling
//! thread, in registration order.

/// Notification raised around schema creation
///
/// Setting `cancel` in a before-creation observer skips table creation. The
/// flag is read once every before-creation observer has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseCreationEvent {
    pub cancel: bool,
}

pub type BeforeCreationObserver<'a> = Box<dyn FnMut(&mut DatabaseCreationEvent) + 'a>;
pub type AfterCreationObserver<'a> = Box<dyn FnMut(&DatabaseCreationEvent) + 'a>;

#[derive(Default)]
pub struct CreationObservers<'a> {
    before: Vec<BeforeCreationObserver<'a>>,
    after: Vec<AfterCreationObserver<'a>>,
}

impl<'a> CreationObservers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_before(&mut self, observer: impl FnMut(&mut DatabaseCreationEvent) + 'a) {
        self.before.push(Box::new(observer));
    }

    pub fn add_after(&mut self, observer: impl FnMut(&DatabaseCreationEvent) + 'a) {
        self.after.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn raise_before(&mut self, event: &mut DatabaseCreationEvent) {
        for observer in self.before.iter_mut() {
            observer(event);
        }
    }

    pub(crate) fn raise_after(&mut self, event: &DatabaseCreationEvent) {
        for observer in self.after.iter_mut() {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_observers_run_in_registration_order() {
        let calls = RefCell::new(Vec::new());
        {
            let mut observers = CreationObservers::new();
            observers.add_before(|_| calls.borrow_mut().push("before-1"));
            observers.add_before(|e| {
                calls.borrow_mut().push("before-2");
                e.cancel = true;
            });
            observers.add_after(|e| {
                assert!(e.cancel);
                calls.borrow_mut().push("after");
            });
            assert_eq!(observers.len(), 3);

            let mut event = DatabaseCreationEvent::default();
            observers.raise_before(&mut event);
            observers.raise_after(&event);
        }
        assert_eq!(calls.into_inner(), vec!["before-1", "before-2", "after"]);
    }
}
