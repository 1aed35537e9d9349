use std::ops::{Add, Range};

pub type File = usize;

/// A byte range in one input file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub file: File,
}

impl Span {
    pub fn new(file: File, start: usize, end: usize) -> Self {
        Self { start, end, file }
    }

    /// Shift this span by `offset` bytes, e.g. to turn a line-relative span
    /// into a file-relative one.
    pub fn offset(self, offset: usize) -> Self {
        Self::new(self.file, self.start + offset, self.end + offset)
    }
}

impl Add<Span> for Span {
    type Output = Span;

    fn add(self, rhs: Span) -> Self::Output {
        assert_eq!(self.file, rhs.file);
        let start = self.start.min(rhs.start);
        let end = self.end.max(rhs.end);

        Self::new(self.file, start, end)
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        Self {
            start: s.start,
            end: s.end,
        }
    }
}
