use alloc::vec::Vec;

use crate::attr::Attr;
use crate::object::{AttributeSet, Serializable};

/// The attributes selected by an [`AttributeSet`], in output order.
#[derive(Default)]
pub struct Projection<'a> {
    entries: Vec<(&'static str, &'a dyn Attr)>,
}

impl<'a> Projection<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&'a dyn Attr> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, attr)| attr)
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(name, _)| name)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'static str, &'a dyn Attr)> + '_ {
        self.entries.iter().copied()
    }
}

impl<'a> IntoIterator for Projection<'a> {
    type Item = (&'static str, &'a dyn Attr);
    type IntoIter = alloc::vec::IntoIter<(&'static str, &'a dyn Attr)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Reads the attributes of `object` selected by `set`.
///
/// With [`AttributeSet::Only`], attributes come out in the set's order and
/// names that are not bound on the instance are skipped. With
/// [`AttributeSet::All`], every bound attribute comes out in declaration
/// order.
pub fn project<'a, S>(object: &'a S, set: &AttributeSet) -> Projection<'a>
where
    S: Serializable + ?Sized,
{
    let bound = object.bound_attrs();
    let entries = match set.names() {
        None => bound,
        Some(names) => names
            .iter()
            .filter_map(|name| bound.iter().find(|(n, _)| n == name).copied())
            .collect(),
    };
    Projection { entries }
}
