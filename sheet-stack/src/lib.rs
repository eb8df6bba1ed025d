//! A stack of modal sheets shared between nested views.
//!
//! [`SheetStack`] holds the sheets currently presented, bottom first. Each
//! view that can present a sheet binds itself to the stack with a
//! [`SheetBinder`], which remembers the depth the view was bound at and keeps
//! the view's presented sheet in sync with the stack in both directions.
//!
//! Everything here is single-threaded and synchronous. Event loops that sleep
//! between frames can install a [`wakeup`] sender to hear about changes.

pub mod binder;
pub mod config;
pub mod error;
pub mod sheet;
pub mod stack;
pub mod wakeup;

pub use binder::{SheetBinder, Transition};
pub use config::StackConfig;
pub use error::SheetError;
pub use sheet::{Presentation, Sheet, SheetProvider};
pub use stack::{Handle, SheetStack, Subscription};

pub mod prelude {
    pub use crate::binder::{SheetBinder, Transition};
    pub use crate::config::StackConfig;
    pub use crate::error::SheetError;
    pub use crate::sheet::{Presentation, Sheet, SheetProvider};
    pub use crate::stack::{Handle, SheetStack, Subscription};
    pub use crate::wakeup::{WakeupReceiver, WakeupSender};
}
