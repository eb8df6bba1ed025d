//! Sheet descriptors and content providers.

use std::fmt::Debug;
use std::hash::Hash;

/// A value describing which sheet to present and with what payload.
///
/// Equal descriptors present the same sheet. [`Sheet::id`] is the stable
/// identity a host uses to tell whether the overlay on screen has to be
/// replaced or can be kept.
pub trait Sheet: Clone + PartialEq + 'static {
    /// Identity type.
    type Id: Clone + Eq + Hash + Debug;

    /// Stable identity of this descriptor.
    fn id(&self) -> Self::Id;
}

/// Produces the content shown for a sheet.
///
/// Implemented for any `Fn(&S) -> C`, so a closure is usually enough:
///
/// ```
/// use sheet_stack::{Sheet, SheetBinder, SheetStack};
///
/// #[derive(Clone, PartialEq)]
/// struct Screen(&'static str);
///
/// impl Sheet for Screen {
///     type Id = &'static str;
///
///     fn id(&self) -> &'static str {
///         self.0
///     }
/// }
///
/// let stack: SheetStack<Screen> = SheetStack::new();
/// let binder = SheetBinder::attach(&stack, |sheet: &Screen| sheet.0.to_uppercase());
///
/// stack.push(Screen("settings"));
/// let shown = binder.render().map(|presentation| presentation.content);
/// assert_eq!(shown.as_deref(), Some("SETTINGS"));
/// ```
pub trait SheetProvider<S> {
    /// Whatever the host renders inside the overlay.
    type Content;

    /// Generate the content for `sheet`.
    fn content(&self, sheet: &S) -> Self::Content;
}

impl<S, C, F> SheetProvider<S> for F
where
    F: Fn(&S) -> C,
{
    type Content = C;

    fn content(&self, sheet: &S) -> C {
        self(sheet)
    }
}

/// A request to show an overlay, returned by
/// [`SheetBinder::render`](crate::SheetBinder::render).
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation<C, I> {
    /// Identity of the presented descriptor.
    pub id: I,
    /// Content produced by the provider.
    pub content: C,
}
