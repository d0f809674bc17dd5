//! Macros for declaring tag hierarchies.

/// Generate a tag enum and its `Tag` implementation.
///
/// A variant written `Child: Parent` descends from `Parent`. Variants listed
/// under `categories` are abstract: they can be requested and used as group
/// members, but never registered as states.
///
/// # Example
///
/// ```
/// use superstate::core::Tag;
/// use superstate::state_tags;
///
/// state_tags! {
///     pub enum AnimalTag {
///         Idle,
///         Hunting,
///         Wrangled,
///         Lassoed: Wrangled,
///         Carried: Wrangled,
///     }
///     categories: [Wrangled]
/// }
///
/// assert!(AnimalTag::Carried.descends_from(AnimalTag::Wrangled));
/// assert!(AnimalTag::Wrangled.is_abstract());
/// assert_eq!(AnimalTag::Lassoed.parent(), Some(AnimalTag::Wrangled));
/// ```
#[macro_export]
macro_rules! state_tags {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(: $parent:ident)?
            ),* $(,)?
        }

        $(categories: [$($category:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Tag for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn parent(&self) -> Option<Self> {
                match self {
                    $(Self::$variant => $crate::__tag_parent!($name $(, $parent)?)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_abstract(&self) -> bool {
                match self {
                    $($(Self::$category => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tag_parent {
    ($name:ident) => {
        None
    };
    ($name:ident, $parent:ident) => {
        Some($name::$parent)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Tag;

    state_tags! {
        enum TestTag {
            Idle,
            Moving,
            Walk: Moving,
            Run: Moving,
            Sprint: Run,
        }
        categories: [Moving]
    }

    #[test]
    fn state_tags_macro_generates_trait() {
        assert_eq!(TestTag::Idle.name(), "Idle");
        assert_eq!(TestTag::Sprint.name(), "Sprint");
        assert_eq!(TestTag::Idle.parent(), None);
        assert_eq!(TestTag::Walk.parent(), Some(TestTag::Moving));
        assert_eq!(TestTag::Sprint.parent(), Some(TestTag::Run));
    }

    #[test]
    fn categories_are_abstract() {
        assert!(TestTag::Moving.is_abstract());
        assert!(!TestTag::Run.is_abstract());
        assert!(TestTag::Sprint.descends_from(TestTag::Moving));
    }

    #[test]
    fn state_tags_supports_visibility() {
        state_tags! {
            pub enum PublicTag {
                A,
                B: A,
            }
        }

        assert!(PublicTag::B.descends_from(PublicTag::A));
        assert!(!PublicTag::A.is_abstract());
    }

    #[test]
    fn state_tags_works_without_hierarchy() {
        state_tags! {
            enum FlatTag {
                One,
                Two,
            }
        }

        assert_eq!(FlatTag::One.parent(), None);
        assert!(!FlatTag::Two.descends_from(FlatTag::One));
    }
}
