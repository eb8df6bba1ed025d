//! The shared stack of presented sheets.
//!
//! Index 0 is the first sheet presented (bottom-most), the last element is the
//! visible one. Only two mutations exist, push (append) and pop (remove last),
//! so an index captured by [`SheetStack::register`] keeps naming the same
//! sheet for as long as that sheet is on the stack.
//!
//! # Notifications
//!
//! Every effective mutation hands a snapshot of the whole stack to each
//! subscriber, synchronously and in registration order. There is no replay: a
//! new subscriber sees nothing until the next mutation.
//!
//! Subscribers may mutate the stack while being notified. The nested mutation
//! delivers its newer snapshot to everyone, after which the outer delivery
//! stops, so nobody sees a stale snapshot after a fresh one.
//!
//! The stack is `!Send`: it belongs to the UI thread and takes no locks.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::config::StackConfig;
use crate::sheet::Sheet;
use crate::wakeup::WakeupSender;

type Listener<S> = Rc<dyn Fn(&[S])>;

/// Stack depth captured when a view bound itself to a [`SheetStack`].
///
/// Only [`SheetStack::register`] creates handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
}

impl Handle {
    /// The depth this handle observes.
    pub fn index(&self) -> usize {
        self.index
    }
}

struct Inner<S> {
    config: StackConfig,
    sheets: RefCell<Vec<S>>,
    listeners: RefCell<Vec<(u64, Listener<S>)>>,
    next_listener: Cell<u64>,
    /// Bumped on every effective mutation.
    generation: Cell<u64>,
    wakeup: RefCell<Option<WakeupSender>>,
}

/// A stack of modal sheets shared by every view that presents them.
///
/// Cloning is cheap; clones share the same stack.
pub struct SheetStack<S> {
    inner: Rc<Inner<S>>,
}

impl<S: Sheet> SheetStack<S> {
    /// Create an empty stack with the default config.
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    /// Create an empty stack.
    pub fn with_config(config: StackConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                sheets: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                generation: Cell::new(0),
                wakeup: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.inner.config
    }

    /// Push a sheet on top of the stack.
    pub fn push(&self, sheet: S) {
        let id = sheet.id();
        let depth = {
            let mut sheets = self.inner.sheets.borrow_mut();
            sheets.push(sheet);
            sheets.len()
        };
        debug!("[{}] push {:?} (depth {})", self.inner.config.name, id, depth);
        self.changed();
    }

    /// Pop the top sheet. Does nothing on an empty stack.
    pub fn pop(&self) -> Option<S> {
        let popped = self.inner.sheets.borrow_mut().pop();
        if let Some(sheet) = &popped {
            debug!(
                "[{}] pop {:?} (depth {})",
                self.inner.config.name,
                sheet.id(),
                self.count()
            );
            self.changed();
        }
        popped
    }

    /// Pop until at most `depth` sheets remain. Returns how many were popped.
    pub fn pop_to(&self, depth: usize) -> usize {
        let mut popped = 0;
        while self.count() > depth {
            if self.pop().is_none() {
                break;
            }
            popped += 1;
        }
        popped
    }

    /// The visible sheet.
    pub fn top(&self) -> Option<S> {
        self.inner.sheets.borrow().last().cloned()
    }

    /// Push `Some(sheet)`, or pop once for `None`.
    pub fn set_top(&self, sheet: Option<S>) {
        match sheet {
            Some(sheet) => self.push(sheet),
            None => {
                self.pop();
            }
        }
    }

    /// The sheet at `index`, counting from the bottom.
    pub fn get(&self, index: usize) -> Option<S> {
        self.inner.sheets.borrow().get(index).cloned()
    }

    /// Number of presented sheets.
    pub fn count(&self) -> usize {
        self.inner.sheets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Snapshot of the whole stack, bottom first.
    pub fn sheets(&self) -> Vec<S> {
        self.inner.sheets.borrow().clone()
    }

    /// Capture the current depth for a view that is about to observe the stack.
    ///
    /// Call once per binding, before pushing anything at that depth.
    pub fn register(&self) -> Handle {
        Handle {
            index: self.count(),
        }
    }

    /// Call `listener` with the full stack after every effective mutation.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
    where
        F: Fn(&[S]) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        trace!("[{}] subscribe #{}", self.inner.config.name, id);
        Subscription {
            stack: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Send a wakeup through `sender` after each mutation.
    ///
    /// Replaces any previously installed sender.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        *self.inner.wakeup.borrow_mut() = Some(sender);
    }

    fn changed(&self) {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);

        let snapshot = self.sheets();
        let listeners: Vec<Listener<S>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        trace!(
            "[{}] notify {} listener(s), depth {}",
            self.inner.config.name,
            listeners.len(),
            snapshot.len()
        );
        for listener in listeners {
            if self.inner.generation.get() != generation {
                trace!(
                    "[{}] notification superseded by a nested mutation",
                    self.inner.config.name
                );
                break;
            }
            listener(&snapshot);
        }

        if self.inner.config.wakeup {
            self.wake();
        }
    }

    fn wake(&self) {
        let mut wakeup = self.inner.wakeup.borrow_mut();
        let Some(sender) = wakeup.as_ref() else {
            return;
        };
        if !sender.is_closed() {
            sender.send();
            return;
        }
        debug!(
            "[{}] wakeup receiver dropped, removing sender",
            self.inner.config.name
        );
        *wakeup = None;
    }
}

impl<S: Sheet> Default for SheetStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for SheetStack<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for SheetStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetStack")
            .field("name", &self.inner.config.name)
            .field("count", &self.inner.sheets.borrow().len())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Keeps a listener registered with a [`SheetStack`].
///
/// Dropping it unsubscribes. It does not keep the stack alive.
#[must_use = "dropping a subscription unsubscribes the listener"]
pub struct Subscription<S> {
    stack: Weak<Inner<S>>,
    id: u64,
}

impl<S> Subscription<S> {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}

    /// Whether the stack this subscription belongs to still exists.
    pub fn is_active(&self) -> bool {
        self.stack.strong_count() > 0
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        let Some(inner) = self.stack.upgrade() else {
            return;
        };
        // The listener is dropped after the borrow ends; it may own other
        // subscriptions to this stack.
        let removed = {
            let mut listeners = inner.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(id, _)| *id == self.id)
                .map(|position| listeners.remove(position))
        };
        if removed.is_some() {
            trace!("[{}] unsubscribe #{}", inner.config.name, self.id);
        }
        drop(removed);
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Page(u32);

    impl Sheet for Page {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn listener_count(stack: &SheetStack<Page>) -> usize {
        stack.inner.listeners.borrow().len()
    }

    #[test]
    fn test_drop_subscription_removes_listener() {
        let stack: SheetStack<Page> = SheetStack::new();
        let first = stack.subscribe(|_| {});
        let second = stack.subscribe(|_| {});
        assert_eq!(listener_count(&stack), 2);

        drop(first);
        assert_eq!(listener_count(&stack), 1);
        second.unsubscribe();
        assert_eq!(listener_count(&stack), 0);
    }

    #[test]
    fn test_generation_counts_effective_mutations() {
        let stack: SheetStack<Page> = SheetStack::new();
        stack.pop();
        assert_eq!(stack.inner.generation.get(), 0);

        stack.push(Page(1));
        stack.push(Page(2));
        stack.pop();
        stack.pop();
        stack.pop();
        assert_eq!(stack.inner.generation.get(), 4);
    }

    #[test]
    fn test_listener_owning_subscription_can_be_dropped() {
        let stack: SheetStack<Page> = SheetStack::new();
        let inner = stack.subscribe(|_| {});
        let outer = stack.subscribe(move |_| {
            let _ = &inner;
        });
        assert_eq!(listener_count(&stack), 2);

        drop(outer);
        assert_eq!(listener_count(&stack), 0);
    }

    #[test]
    fn test_closed_wakeup_sender_is_removed() {
        let stack: SheetStack<Page> = SheetStack::new();
        let (tx, rx) = crate::wakeup::channel();
        stack.install_wakeup(tx);
        drop(rx);

        stack.push(Page(1));
        assert!(stack.inner.wakeup.borrow().is_none());
    }
}
