//! Containment checks for sequences and sets.
//!
//! Element comparisons are set-based: `contains_all`, `contains_exactly` and
//! friends ignore order and repetition. Only `does_not_contain_duplicates`
//! looks at repetition, and it passes immediately for set types.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::{SizeVerifier, Verifier};

/// A collection whose elements can be checked
pub trait Container: Describe {
    type Item: Eq + Hash + Describe;

    /// True if the collection cannot hold duplicate elements
    const IS_SET: bool = false;

    fn items(&self) -> impl Iterator<Item = &Self::Item>;

    fn element_count(&self) -> usize;
}

impl<T: Eq + Hash + Describe> Container for Vec<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        self.len()
    }
}

impl<T: Eq + Hash + Describe> Container for [T] {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        self.len()
    }
}

impl<T: Eq + Hash + Describe, const N: usize> Container for [T; N] {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        N
    }
}

impl<T: Eq + Hash + Describe> Container for VecDeque<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        self.len()
    }
}

impl<T: Eq + Hash + Describe, S> Container for HashSet<T, S> {
    type Item = T;
    const IS_SET: bool = true;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        self.len()
    }
}

impl<T: Eq + Hash + Ord + Describe> Container for BTreeSet<T> {
    type Item = T;
    const IS_SET: bool = true;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn element_count(&self) -> usize {
        self.len()
    }
}

impl<C: Container + ?Sized> Container for &C {
    type Item = C::Item;
    const IS_SET: bool = C::IS_SET;

    fn items(&self) -> impl Iterator<Item = &C::Item> {
        (**self).items()
    }

    fn element_count(&self) -> usize {
        (**self).element_count()
    }
}

/// Distinct elements of `items` that satisfy `keep`, in order of first
/// appearance
fn distinct<'a, T, I>(items: I, mut keep: impl FnMut(&T) -> bool) -> Vec<&'a T>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| keep(*item) && seen.insert(*item))
        .collect()
}

fn present<C: Container>(container: &C) -> HashSet<&C::Item> {
    container.items().collect()
}

fn as_item<C: Container, E: Borrow<C::Item>>(element: &E) -> &C::Item {
    element.borrow()
}

/// Elements of `elements` that are absent from `container`
fn absent<'a, C, E>(container: &'a C, elements: &'a [E]) -> Vec<&'a C::Item>
where
    C: Container,
    E: Borrow<C::Item>,
{
    let held = present(container);
    distinct(elements.iter().map(as_item::<C, E>), |e| !held.contains(e))
}

/// Elements of `elements` that are present in `container`
fn shared<'a, C, E>(container: &'a C, elements: &'a [E]) -> Vec<&'a C::Item>
where
    C: Container,
    E: Borrow<C::Item>,
{
    let held = present(container);
    distinct(elements.iter().map(as_item::<C, E>), |e| held.contains(e))
}

/// Elements of `container` that are not among `elements`
fn extra<'a, C, E>(container: &'a C, elements: &'a [E]) -> Vec<&'a C::Item>
where
    C: Container,
    E: Borrow<C::Item>,
{
    let wanted: HashSet<&C::Item> = elements.iter().map(as_item::<C, E>).collect();
    distinct(container.items(), |e| !wanted.contains(e))
}

/// Elements that occur more than once in `container`
fn repeated<C: Container>(container: &C) -> Vec<&C::Item> {
    let mut seen = HashSet::new();
    let repeats: Vec<&C::Item> = container.items().filter(|e| !seen.insert(*e)).collect();
    distinct(repeats, |_| true)
}

impl<C: Container> Verifier<C> {
    fn check_elements(
        self,
        op: &'static str,
        passed: impl FnOnce(&C) -> bool,
        requirement: impl FnOnce() -> String,
        context: impl FnOnce(&C) -> Vec<(&'static str, String)>,
    ) -> Result<Self> {
        self.verify(passed, |v| {
            let mut failure = v
                .failure(
                    op,
                    ExceptionKind::InvalidArgument,
                    format!("{} {}.", v.quoted_name(), requirement()),
                )
                .add_context(ACTUAL, v.value());
            for (label, value) in context(v.value()) {
                failure = failure.add_context(label, value.as_str());
            }
            failure.build()
        })
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the collection is empty.
    pub fn is_empty(self) -> Result<Self> {
        self.check_elements(
            "is_empty",
            |c| c.element_count() == 0,
            || "must be empty".to_string(),
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the collection is empty.
    pub fn is_not_empty(self) -> Result<Self> {
        self.check_elements(
            "is_not_empty",
            |c| c.element_count() != 0,
            || "may not be empty".to_string(),
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless `element` is in the collection.
    pub fn contains<E>(self, element: E) -> Result<Self>
    where
        E: Borrow<C::Item> + Describe,
    {
        self.check_elements(
            "contains",
            |c| c.items().any(|item| item == as_item::<C, E>(&element)),
            || format!("must contain {}", element.describe()),
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if `element` is in the collection.
    pub fn does_not_contain<E>(self, element: E) -> Result<Self>
    where
        E: Borrow<C::Item> + Describe,
    {
        self.check_elements(
            "does_not_contain",
            |c| !c.items().any(|item| item == as_item::<C, E>(&element)),
            || format!("may not contain {}", element.describe()),
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless at least one of `elements` is in the
    /// collection.
    pub fn contains_any<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let wanted: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "contains_any",
            |c| !shared(c, &wanted).is_empty(),
            || format!("must contain any of {}", wanted.describe()),
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if any of `elements` is in the collection. The
    /// failure lists them as `Unwanted`.
    pub fn does_not_contain_any<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let unwanted: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "does_not_contain_any",
            |c| shared(c, &unwanted).is_empty(),
            || format!("may not contain any of {}", unwanted.describe()),
            |c| vec![("Unwanted", shared(c, &unwanted).describe())],
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless every one of `elements` is in the collection.
    /// The failure lists the absent ones as `Missing`.
    pub fn contains_all<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let wanted: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "contains_all",
            |c| absent(c, &wanted).is_empty(),
            || format!("must contain all of {}", wanted.describe()),
            |c| vec![("Missing", absent(c, &wanted).describe())],
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if every one of `elements` is in the collection.
    pub fn does_not_contain_all<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let unwanted: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "does_not_contain_all",
            |c| !absent(c, &unwanted).is_empty(),
            || format!("may not contain all of {}", unwanted.describe()),
            |_| Vec::new(),
        )
    }

    /// Same distinct elements as `elements`, in any order
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the distinct elements differ. The failure lists
    /// absent elements as `Missing` and extra ones as `Unwanted`.
    pub fn contains_exactly<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let expected: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "contains_exactly",
            |c| absent(c, &expected).is_empty() && extra(c, &expected).is_empty(),
            || {
                format!(
                    "must consist of the elements {}, regardless of their order",
                    expected.describe()
                )
            },
            |c| {
                vec![
                    ("Missing", absent(c, &expected).describe()),
                    ("Unwanted", extra(c, &expected).describe()),
                ]
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the collection has the same distinct elements as
    /// `elements`, in any order.
    pub fn does_not_contain_exactly<I>(self, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item> + Describe,
    {
        let unwanted: Vec<I::Item> = elements.into_iter().collect();
        self.check_elements(
            "does_not_contain_exactly",
            |c| !(absent(c, &unwanted).is_empty() && extra(c, &unwanted).is_empty()),
            || {
                format!(
                    "may not consist of the elements {}, regardless of their order",
                    unwanted.describe()
                )
            },
            |_| Vec::new(),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if any element occurs more than once. The failure
    /// lists every repeated element as `Duplicates`.
    pub fn does_not_contain_duplicates(self) -> Result<Self> {
        if C::IS_SET {
            return Ok(self);
        }
        self.check_elements(
            "does_not_contain_duplicates",
            |c| repeated(c).is_empty(),
            || "may not contain any duplicate elements".to_string(),
            |c| vec![("Duplicates", repeated(c).describe())],
        )
    }

    /// Verify the number of elements in the collection
    pub fn size(self) -> SizeVerifier<C> {
        let size = self.value().element_count();
        SizeVerifier::new(self, size, "size()")
    }
}
