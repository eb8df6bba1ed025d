//! Binding a view to a depth of a [`SheetStack`].
//!
//! A view that can present sheets attaches a [`SheetBinder`] when it enters
//! the hierarchy. The binder captures the stack depth at that moment (its
//! [`Handle`]) and from then on tracks the one sheet presented at that depth:
//!
//! - the stack pushes or pops: the observed sheet is re-derived as
//!   `stack[handle]`, or none;
//! - the view sets the observed sheet itself: a new sheet is pushed if nothing
//!   is presented at this depth yet, and clearing it pops this view's sheet
//!   together with every sheet stacked above it;
//! - the user dismisses the overlay: this view's sheet is popped.
//!
//! Dropping the binder (or calling [`SheetBinder::detach`]) stops observing.
//! The stack is not touched on detach.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::error::SheetError;
use crate::sheet::{Presentation, Sheet, SheetProvider};
use crate::stack::{Handle, SheetStack, Subscription};

/// What a binder did in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The stack was not modified.
    Unchanged,
    /// The observed sheet was pushed at this binder's depth.
    Pushed,
    /// Sheets stacked above this binder's own were popped.
    Collapsed { popped: usize },
    /// This binder's own sheet was popped.
    Dismissed,
}

/// Presentation state of one view bound to a [`SheetStack`].
pub struct SheetBinder<S: Sheet, P> {
    stack: SheetStack<S>,
    handle: Handle,
    provider: P,
    observed: RefCell<Option<S>>,
    subscription: RefCell<Option<Subscription<S>>>,
}

impl<S, P> SheetBinder<S, P>
where
    S: Sheet,
    P: SheetProvider<S> + 'static,
{
    /// Bind a view at the current depth of `stack`.
    ///
    /// Nothing is observed until the stack next changes.
    pub fn attach(stack: &SheetStack<S>, provider: P) -> Rc<Self> {
        let handle = stack.register();
        debug!(
            "[{}] attach binder at depth {}",
            stack.config().name,
            handle.index()
        );

        Rc::new_cyclic(|this: &Weak<Self>| {
            let this = this.clone();
            let subscription = stack.subscribe(move |sheets: &[S]| {
                if let Some(binder) = this.upgrade() {
                    binder.on_notification(sheets);
                }
            });
            Self {
                stack: stack.clone(),
                handle,
                provider,
                observed: RefCell::new(None),
                subscription: RefCell::new(Some(subscription)),
            }
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn stack(&self) -> &SheetStack<S> {
        &self.stack
    }

    /// The sheet this view currently presents.
    pub fn observed(&self) -> Option<S> {
        self.observed.borrow().clone()
    }

    pub fn is_presented(&self) -> bool {
        self.observed.borrow().is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Re-derive the observed sheet from a stack snapshot.
    ///
    /// Wired to the stack's notifications by [`attach`](Self::attach); hosts
    /// only call this directly when replaying a snapshot themselves.
    pub fn on_notification(&self, sheets: &[S]) -> Transition {
        let derived = sheets.get(self.handle.index()).cloned();
        if *self.observed.borrow() == derived {
            return Transition::Unchanged;
        }
        trace!(
            "[{}] depth {} now observes {:?}",
            self.stack.config().name,
            self.handle.index(),
            derived.as_ref().map(S::id)
        );
        *self.observed.borrow_mut() = derived;
        self.reconcile()
    }

    /// The view changed its presented sheet.
    ///
    /// Setting the current value again is not a change. Clearing it dismisses
    /// this view's sheet along with everything stacked above it, see
    /// [`dismiss`](Self::dismiss). Asking for a sheet other than the one
    /// already presented at this depth is refused with
    /// [`SheetError::Occupied`] and leaves both the binder and the stack as
    /// they were.
    pub fn set_observed(&self, sheet: Option<S>) -> Result<Transition, SheetError> {
        if *self.observed.borrow() == sheet {
            return Ok(Transition::Unchanged);
        }
        let Some(requested) = sheet else {
            return Ok(self.dismiss());
        };

        let index = self.handle.index();
        let count = self.stack.count();
        let presented = self.stack.get(index);
        if count > index && presented.as_ref() != Some(&requested) {
            warn!(
                "[{}] depth {} asked to present {:?} over {:?}, ignoring",
                self.stack.config().name,
                index,
                requested.id(),
                presented.as_ref().map(S::id)
            );
            return Err(SheetError::Occupied { index, count });
        }

        *self.observed.borrow_mut() = Some(requested);
        Ok(self.reconcile())
    }

    /// The user dismissed the overlay. Pops this view's sheet if it is still
    /// on the stack.
    pub fn on_dismiss(&self) -> Transition {
        if self.stack.count() > self.handle.index() {
            self.stack.pop();
            Transition::Dismissed
        } else {
            Transition::Unchanged
        }
    }

    /// Clear the observed sheet: collapse the sheets stacked above this
    /// view's own, then pop its own. Afterwards the stack is no deeper than
    /// the handle's index and nothing is observed.
    pub fn dismiss(&self) -> Transition {
        *self.observed.borrow_mut() = None;
        // Collapsing re-derives the own sheet through notifications; the
        // dismissal below clears it again.
        self.reconcile();
        self.on_dismiss()
    }

    /// The overlay to show, if this view presents a sheet.
    pub fn render(&self) -> Option<Presentation<P::Content, S::Id>> {
        let sheet = self.observed()?;
        Some(Presentation {
            id: sheet.id(),
            content: self.provider.content(&sheet),
        })
    }

    /// Stop observing the stack. Later notifications are ignored.
    pub fn detach(&self) {
        let subscription = self.subscription.borrow_mut().take();
        if subscription.is_some() {
            debug!(
                "[{}] detach binder at depth {}",
                self.stack.config().name,
                self.handle.index()
            );
        }
        drop(subscription);
    }

    fn reconcile(&self) -> Transition {
        let index = self.handle.index();
        let count = self.stack.count();
        let observed = self.observed();

        match observed {
            Some(sheet) if count == index => {
                self.stack.push(sheet);
                Transition::Pushed
            }
            None if count > index => match self.stack.pop_to(index + 1) {
                0 => Transition::Unchanged,
                popped => Transition::Collapsed { popped },
            },
            _ => Transition::Unchanged,
        }
    }
}

impl<S: Sheet, P> fmt::Debug for SheetBinder<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetBinder")
            .field("index", &self.handle.index())
            .field("observed", &self.observed.borrow().as_ref().map(S::id))
            .field("attached", &self.subscription.borrow().is_some())
            .finish()
    }
}
