use core::{iter::FusedIterator, slice};

use smallvec::SmallVec;

/// A single URL parameter, consisting of a key and a value.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
struct Param<'k, 'v> {
    key: &'k str,
    value: &'v str,
}

impl<'k, 'v> Param<'k, 'v> {
    fn pair(&self) -> (&'k str, &'v str) {
        (self.key, self.value)
    }
}

/// Ordered list of route parameters produced by a successful match.
///
/// Keys borrow from the router and values borrow from the matched path. Parameters are kept in
/// the left-to-right order they appear in the route. The first two are stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'k, 'v> {
    inner: SmallVec<[Param<'k, 'v>; 2]>,
}

impl<'k, 'v> Params<'k, 'v> {
    pub(crate) fn new() -> Self {
        Self { inner: SmallVec::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the value of the first parameter registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'v str> {
        let key = key.as_ref();
        self.inner.iter().find(|param| param.key == key).map(|param| param.value)
    }

    /// Returns an iterator over the parameters in the list.
    pub fn iter(&self) -> ParamsIter<'_, 'k, 'v> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    /// Inserts a key value parameter pair into the list.
    pub(crate) fn push(&mut self, key: &'k str, value: &'v str) {
        self.inner.push(Param { key, value });
    }

    pub(crate) fn truncate(&mut self, n: usize) {
        self.inner.truncate(n);
    }
}

/// An iterator over the keys and values of a route's [parameters](Params).
pub struct ParamsIter<'p, 'k, 'v> {
    inner: slice::Iter<'p, Param<'k, 'v>>,
}

impl<'k, 'v> Iterator for ParamsIter<'_, 'k, 'v> {
    type Item = (&'k str, &'v str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Param::pair)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_, '_, '_> {}

impl FusedIterator for ParamsIter<'_, '_, '_> {}

impl<'p, 'k, 'v> IntoIterator for &'p Params<'k, 'v> {
    type Item = (&'k str, &'v str);
    type IntoIter = ParamsIter<'p, 'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'k, 'v> IntoIterator for Params<'k, 'v> {
    type Item = (&'k str, &'v str);
    type IntoIter = ParamsIntoIter<'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        ParamsIntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

/// An owning iterator over a route's [parameters](Params).
pub struct ParamsIntoIter<'k, 'v> {
    inner: smallvec::IntoIter<[Param<'k, 'v>; 2]>,
}

impl<'k, 'v> Iterator for ParamsIntoIter<'k, 'v> {
    type Item = (&'k str, &'v str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| p.pair())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
