use memchr::memchr;

/// Splits a string on a single ASCII delimiter, yielding every segment including empty ones.
pub(crate) struct MemchrSplitter<'a> {
    haystack: &'a str,
    delimiter: u8,
    offset: Option<usize>,
}

impl<'a> MemchrSplitter<'a> {
    pub(crate) fn split(haystack: &'a str, delimiter: u8) -> Self {
        debug_assert!(delimiter.is_ascii());
        MemchrSplitter {
            haystack,
            delimiter,
            offset: Some(0),
        }
    }
}

impl<'a> Iterator for MemchrSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset?;

        // An ASCII delimiter can never fall inside a multi-byte character, so the byte offsets
        // below are always on character boundaries.
        match memchr(self.delimiter, &self.haystack.as_bytes()[offset..]) {
            Some(index) => {
                self.offset = Some(offset + index + 1);
                Some(&self.haystack[offset..offset + index])
            }
            None => {
                // The trailing segment, which may be empty (e.g. `foo-`).
                self.offset = None;
                Some(&self.haystack[offset..])
            }
        }
    }
}
