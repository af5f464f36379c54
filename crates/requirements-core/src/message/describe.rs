//! String form of values in failure messages
//!
//! Strings render unquoted, absent values render as `null`, sequences as
//! `[a, b]` and maps as `{k=v}`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// Token rendered for an absent value
pub const NULL: &str = "null";

/// Renders a value the way failure messages show it
///
/// Implemented for primitives, strings, options, smart pointers and the
/// standard collections. Use [`describe_via_display!`](crate::describe_via_display)
/// or [`describe_via_debug!`](crate::describe_via_debug) for your own types.
pub trait Describe {
    /// The string form of the value
    fn describe(&self) -> String;

    /// True for booleans, which are never diffed
    fn is_boolean(&self) -> bool {
        false
    }
}

/// Implement [`Describe`] through `Display`
///
/// ```
/// use requirements_core::{describe_via_display, Describe};
///
/// struct Port(u16);
/// impl std::fmt::Display for Port {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, ":{}", self.0)
///     }
/// }
/// describe_via_display!(Port);
///
/// assert_eq!(Port(80).describe(), ":80");
/// ```
#[macro_export]
macro_rules! describe_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::message::Describe for $ty {
                fn describe(&self) -> String {
                    ::std::string::ToString::to_string(self)
                }
            }
        )+
    };
}

/// Implement [`Describe`] through `Debug`
#[macro_export]
macro_rules! describe_via_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::message::Describe for $ty {
                fn describe(&self) -> String {
                    format!("{:?}", self)
                }
            }
        )+
    };
}

describe_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, str, String
);

impl Describe for bool {
    fn describe(&self) -> String {
        self.to_string()
    }

    fn is_boolean(&self) -> bool {
        true
    }
}

impl Describe for () {
    fn describe(&self) -> String {
        "()".to_string()
    }
}

impl Describe for Path {
    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl Describe for PathBuf {
    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> String {
        match self {
            Some(value) => value.describe(),
            None => NULL.to_string(),
        }
    }

    fn is_boolean(&self) -> bool {
        self.as_ref().is_some_and(Describe::is_boolean)
    }
}

macro_rules! describe_via_deref {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn describe(&self) -> String {
                    (**self).describe()
                }

                fn is_boolean(&self) -> bool {
                    (**self).is_boolean()
                }
            }
        )+
    };
}

describe_via_deref!(Box, Rc, Arc);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_boolean(&self) -> bool {
        (**self).is_boolean()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_boolean(&self) -> bool {
        (**self).is_boolean()
    }
}

/// `[a, b, c]`
pub(crate) fn describe_sequence<'a, T, I>(items: I) -> String
where
    T: Describe + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let parts: Vec<String> = items.into_iter().map(Describe::describe).collect();
    format!("[{}]", parts.join(", "))
}

fn describe_map<'a, K, V, I>(entries: I) -> String
where
    K: Describe + 'a,
    V: Describe + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{}={}", k.describe(), v.describe()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

impl<T: Describe> Describe for [T] {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe(&self) -> String {
        describe_sequence(self)
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe(&self) -> String {
        describe_map(self)
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(&self) -> String {
        describe_map(self)
    }
}
