//! Non-empty ordered collection
//!
//! `NonEmptyArray<T>` wraps a `Vec<T>` that always holds at least one element.
//! It does not deref to `Vec` or slices: every operation is re-derived so the
//! return type states whether the invariant survives. Transforms that cannot
//! shrink the collection return `NonEmptyArray<U>`; transforms that may drop
//! every element return `Option<NonEmptyArray<T>>` or a plain `Vec`.

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Returned when an empty sequence is offered where a non-empty one is required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected a non-empty array, got an empty one")]
pub struct EmptyArrayError;

/// Check whether a slice satisfies the non-empty invariant
pub fn is_non_empty_array<T>(values: &[T]) -> bool {
    !values.is_empty()
}

/// Build a [`NonEmptyArray`] from one or more elements
///
/// ```rust,ignore
/// let letters = non_empty!["a", "b", "c"];
/// assert_eq!(letters.len(), 3);
/// ```
#[macro_export]
macro_rules! non_empty {
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::non_empty::NonEmptyArray::new($head, ::std::vec![$($tail),*])
    };
}

/// An ordered sequence guaranteed to contain at least one element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyArray<T> {
    inner: Vec<T>,
}

impl<T> NonEmptyArray<T> {
    /// Create from a first element and any number of following elements
    pub fn new(head: T, tail: Vec<T>) -> Self {
        let mut inner = Vec::with_capacity(tail.len() + 1);
        inner.push(head);
        inner.extend(tail);
        Self { inner }
    }

    /// Create a single-element array
    pub fn singleton(value: T) -> Self {
        Self { inner: vec![value] }
    }

    /// Validate a possibly-empty vector
    pub fn try_from_vec(values: Vec<T>) -> Result<Self, EmptyArrayError> {
        if values.is_empty() {
            return Err(EmptyArrayError);
        }
        Ok(Self { inner: values })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// First element; total because the array is never empty
    pub fn first(&self) -> &T {
        &self.inner[0]
    }

    /// Last element; total because the array is never empty
    pub fn last(&self) -> &T {
        &self.inner[self.inner.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.inner.get(index)
    }

    /// Split into the first element and the (possibly empty) remainder
    pub fn split_first(&self) -> (&T, &[T]) {
        (&self.inner[0], &self.inner[1..])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    pub fn into_vec(self) -> Vec<T> {
        self.inner
    }

    /// Transform every element, keeping length and order
    pub fn map<U, F>(self, f: F) -> NonEmptyArray<U>
    where
        F: FnMut(T) -> U,
    {
        NonEmptyArray {
            inner: self.inner.into_iter().map(f).collect(),
        }
    }

    /// Reverse element order
    pub fn reverse(mut self) -> Self {
        self.inner.reverse();
        self
    }

    /// Append zero or more possibly-empty sequences after this array
    pub fn concat<I, S>(mut self, others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        for other in others {
            self.inner.extend(other);
        }
        self
    }

    /// Map every element to a non-empty array and concatenate the results.
    ///
    /// Each element contributes at least one value, so the result is still
    /// non-empty. A callback producing a single value per element is `map`.
    pub fn flat_map<U, F>(self, mut f: F) -> NonEmptyArray<U>
    where
        F: FnMut(T) -> NonEmptyArray<U>,
    {
        let mut inner = Vec::with_capacity(self.inner.len());
        for value in self.inner {
            inner.extend(f(value).inner);
        }
        NonEmptyArray { inner }
    }

    /// Keep the elements matching `predicate`; `None` when nothing survives
    pub fn filter<P>(self, mut predicate: P) -> Option<Self>
    where
        P: FnMut(&T) -> bool,
    {
        let kept: Vec<T> = self.inner.into_iter().filter(|value| predicate(value)).collect();
        Self::try_from_vec(kept).ok()
    }

    /// Copy the half-open range `start..end`.
    ///
    /// Indices follow `Array.prototype.slice`: negative values count from the
    /// end, out-of-range values clamp, and a missing `end` means the length.
    /// Returns `None` when the range selects nothing.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Option<Self>
    where
        T: Clone,
    {
        let len = self.inner.len();
        let from = clamp_index(start, len);
        let to = end.map_or(len, |end| clamp_index(end, len));

        if from >= to {
            return None;
        }
        Some(Self {
            inner: self.inner[from..to].to_vec(),
        })
    }
}

fn clamp_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

impl<I> NonEmptyArray<I>
where
    I: IntoIterator,
{
    /// Flatten one level of nesting. Every inner sequence may be empty, so the
    /// result is a plain `Vec`.
    pub fn flatten(self) -> Vec<I::Item> {
        self.inner.into_iter().flatten().collect()
    }
}

/// A value or an arbitrarily nested list of values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Value(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn value(value: T) -> Self {
        Nested::Value(value)
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Nested<T>>,
    {
        Nested::List(items.into_iter().collect())
    }
}

impl<T> NonEmptyArray<Nested<T>> {
    /// Flatten nested lists one level deep
    pub fn flat(self) -> Vec<Nested<T>> {
        self.flat_depth(1)
    }

    /// Flatten nested lists up to `depth` levels.
    ///
    /// The input may consist solely of empty lists, so the result is a plain
    /// `Vec` rather than a `NonEmptyArray`.
    pub fn flat_depth(self, depth: usize) -> Vec<Nested<T>> {
        let mut out = Vec::with_capacity(self.inner.len());
        flatten_into(self.inner, depth, &mut out);
        out
    }
}

fn flatten_into<T>(items: Vec<Nested<T>>, depth: usize, out: &mut Vec<Nested<T>>) {
    for item in items {
        match item {
            Nested::List(children) if depth > 0 => flatten_into(children, depth - 1, out),
            other => out.push(other),
        }
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyArray<T> {
    type Error = EmptyArrayError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::try_from_vec(values)
    }
}

impl<T> From<NonEmptyArray<T>> for Vec<T> {
    fn from(values: NonEmptyArray<T>) -> Self {
        values.inner
    }
}

impl<T> AsRef<[T]> for NonEmptyArray<T> {
    fn as_ref(&self) -> &[T] {
        &self.inner
    }
}

impl<T> IntoIterator for NonEmptyArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for NonEmptyArray<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.inner == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for NonEmptyArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.inner.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Display> fmt::Display for NonEmptyArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.inner.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl<T: Serialize> Serialize for NonEmptyArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for NonEmptyArray<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        Self::try_from_vec(values).map_err(D::Error::custom)
    }
}
