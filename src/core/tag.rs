//! State tags and the concrete/abstract tag hierarchy.
//!
//! Every registered state is identified by a concrete tag. Tags may also be
//! abstract categories that group several concrete tags underneath them, so
//! a transition can name "any wrangled behavior" and let the machine resolve
//! whichever concrete state is registered for it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state tags.
///
/// Tags form a closed hierarchy described by [`Tag::parent`]. A tag with no
/// parent is a root. Abstract tags can never be registered as states; they
/// only exist to be requested and to be used as group members.
///
/// Most code declares tags through [`state_tags!`](crate::state_tags), which
/// generates this implementation.
///
/// # Example
///
/// ```rust
/// use superstate::core::Tag;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum CowTag {
///     Grazing,
///     Wrangled,
///     Lassoed,
///     Carried,
/// }
///
/// impl Tag for CowTag {
///     fn name(&self) -> &str {
///         match self {
///             Self::Grazing => "Grazing",
///             Self::Wrangled => "Wrangled",
///             Self::Lassoed => "Lassoed",
///             Self::Carried => "Carried",
///         }
///     }
///
///     fn parent(&self) -> Option<Self> {
///         match self {
///             Self::Lassoed | Self::Carried => Some(Self::Wrangled),
///             _ => None,
///         }
///     }
///
///     fn is_abstract(&self) -> bool {
///         matches!(self, Self::Wrangled)
///     }
/// }
///
/// assert!(CowTag::Lassoed.descends_from(CowTag::Wrangled));
/// assert!(!CowTag::Grazing.descends_from(CowTag::Wrangled));
/// ```
pub trait Tag:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Get the tag's name for display/logging.
    fn name(&self) -> &str;

    /// The direct ancestor of this tag, if any.
    fn parent(&self) -> Option<Self>;

    /// Whether this tag is a category rather than a registrable state.
    ///
    /// Default implementation returns `false`.
    fn is_abstract(&self) -> bool {
        false
    }

    /// Check if this tag is `ancestor` or sits anywhere below it.
    fn descends_from(&self, ancestor: Self) -> bool {
        let mut cursor = Some(*self);
        while let Some(tag) = cursor {
            if tag == ancestor {
                return true;
            }
            cursor = tag.parent();
        }
        false
    }

    /// Iterate over this tag's ancestors, nearest first, excluding itself.
    fn ancestors(&self) -> Ancestors<Self> {
        Ancestors {
            next: self.parent(),
        }
    }
}

/// Iterator over a tag's ancestor chain.
pub struct Ancestors<T: Tag> {
    next: Option<T>,
}

impl<T: Tag> Iterator for Ancestors<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
