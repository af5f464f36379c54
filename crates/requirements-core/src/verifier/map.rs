//! Key checks for `HashMap` and `BTreeMap`.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::{SizeVerifier, Verifier};

/// Maps whose keys can be looked up
pub trait Keyed: Describe {
    type Key: Describe;

    fn has_key(&self, key: &Self::Key) -> bool;

    fn entry_count(&self) -> usize;
}

impl<K, V, S> Keyed for HashMap<K, V, S>
where
    K: Eq + Hash + Describe,
    V: Describe,
    S: BuildHasher,
{
    type Key = K;

    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<K: Ord + Describe, V: Describe> Keyed for BTreeMap<K, V> {
    type Key = K;

    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<M: Keyed> Verifier<M> {
    fn check_map(
        self,
        op: &'static str,
        passed: impl FnOnce(&M) -> bool,
        requirement: impl FnOnce() -> String,
    ) -> Result<Self> {
        self.verify(passed, |v| {
            v.failure(
                op,
                ExceptionKind::InvalidArgument,
                format!("{} {}.", v.quoted_name(), requirement()),
            )
            .add_context(ACTUAL, v.value())
            .build()
        })
    }

    fn map_size(self) -> SizeVerifier<M> {
        let size = self.value().entry_count();
        SizeVerifier::new(self, size, "size()")
    }
}

macro_rules! map_verifier {
    ($([$($generics:ident),*] $ty:ty;)*) => {
        $(
            impl<$($generics),*> Verifier<$ty>
            where
                $ty: Keyed,
            {
                /// # Errors
                ///
                /// `InvalidArgument` unless the map is empty.
                pub fn is_empty(self) -> Result<Self> {
                    self.check_map("is_empty", |m| m.entry_count() == 0, || "must be empty".to_string())
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the map is empty.
                pub fn is_not_empty(self) -> Result<Self> {
                    self.check_map("is_not_empty", |m| m.entry_count() != 0, || "may not be empty".to_string())
                }

                /// # Errors
                ///
                /// `InvalidArgument` unless the map has an entry for `key`.
                pub fn contains_key<Q>(self, key: Q) -> Result<Self>
                where
                    Q: Borrow<<$ty as Keyed>::Key> + Describe,
                {
                    self.check_map(
                        "contains_key",
                        |m| m.has_key(key.borrow()),
                        || format!("must contain the key {}", key.describe()),
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the map has an entry for `key`.
                pub fn does_not_contain_key<Q>(self, key: Q) -> Result<Self>
                where
                    Q: Borrow<<$ty as Keyed>::Key> + Describe,
                {
                    self.check_map(
                        "does_not_contain_key",
                        |m| !m.has_key(key.borrow()),
                        || format!("may not contain the key {}", key.describe()),
                    )
                }

                /// Verify the number of entries in the map
                pub fn size(self) -> SizeVerifier<$ty> {
                    self.map_size()
                }
            }
        )*
    };
}

map_verifier! {
    [K, V, S] HashMap<K, V, S>;
    [K, V] BTreeMap<K, V>;
}

#[cfg(test)]
mod tests {
    use crate::config::Configuration;

    use super::*;

    fn verifier<T>(value: T) -> Verifier<T> {
        Verifier::new(value, "map".to_string(), Configuration::new(), true)
    }

    #[test]
    fn test_keys() {
        let mut ports = HashMap::new();
        ports.insert("http", 80);
        assert!(verifier(ports.clone()).contains_key("http").is_ok());
        assert!(verifier(ports.clone()).does_not_contain_key("ftp").is_ok());

        let err = verifier(ports).contains_key("ftp").unwrap_err();
        assert_eq!(
            err.message(),
            "\"map\" must contain the key ftp.\nActual: {http=80}"
        );
    }

    #[test]
    fn test_btree_map_size_and_emptiness() {
        let mut map = BTreeMap::new();
        assert!(verifier(map.clone()).is_empty().is_ok());
        map.insert(1, "one".to_string());
        let size = verifier(map).is_not_empty().unwrap().size();
        assert_eq!(size.name(), "map.size()");
        assert!(size.is_equal_to(1).is_ok());
    }
}
