//! Append-only collection of decoded objects.

/// Output collection shared with the host across frames.
///
/// Decode calls only append to it; existing entries are never read back,
/// reordered or cleared by the decoders. Retiring entries is up to the owner
/// through [`ObjectList::into_vec`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectList<T> {
    items: Vec<T>,
}

impl<T> Default for ObjectList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ObjectList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub(crate) fn append(&mut self, objects: Vec<T>) {
        self.items.extend(objects);
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
