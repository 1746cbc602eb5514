use std::fmt;
use std::ops::Deref;

use triomphe::ThinArc;

/// Shared, immutable source text.
///
/// Every token keeps a handle to the text it was cut from and renders its
/// value through [`slice`](BambooString::slice), so a parse tree holds one
/// allocation of source no matter how many tokens it carries. The handle is
/// a thin refcounted pointer from [`triomphe`]: the length lives inside the
/// allocation and there is no weak-reference counter to pay for.
///
/// [`triomphe`]: https://crates.io/crates/triomphe
#[derive(Clone)]
pub struct BambooString {
    // Invariant: well-formed UTF-8, guaranteed at construction and never
    // mutated afterwards.
    text: ThinArc<(), u8>,
}

impl BambooString {
    pub fn new(value: &str) -> Self {
        Self {
            text: ThinArc::from_header_and_slice((), value.as_bytes()),
        }
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: the bytes were copied out of a `&str` in `new` and the
        // allocation is immutable, so the UTF-8 invariant still holds.
        unsafe { std::str::from_utf8_unchecked(&self.text.slice) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text.slice
    }

    pub fn len(&self) -> usize {
        self.text.slice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.slice.is_empty()
    }

    /// The `start..end` byte range of the text, as a string slice. This is
    /// how tokens render their values without owning them. Panics off
    /// character boundaries, like any `str` slice.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.as_str()[start..end]
    }

    /// Whether two handles share one allocation.
    pub fn ptr_eq(&self, other: &BambooString) -> bool {
        std::ptr::eq(self.text.slice.as_ptr(), other.text.slice.as_ptr())
    }
}

impl Deref for BambooString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for BambooString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for BambooString {
    fn from(value: &str) -> Self {
        BambooString::new(value)
    }
}

impl Default for BambooString {
    fn default() -> Self {
        BambooString::new("")
    }
}

impl PartialEq for BambooString {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_str() == other.as_str()
    }
}

impl Eq for BambooString {}

impl PartialEq<str> for BambooString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for BambooString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for BambooString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for BambooString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
