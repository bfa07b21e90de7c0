/// Index of the displayed question in a fixed-length sequence.
///
/// Always within `[0, len - 1]` for a non-empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.len.saturating_sub(1));
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_clamps_at_start() {
        let mut cursor = Cursor::new(4);
        cursor.prev();
        cursor.prev();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.is_first());
        assert!(!cursor.is_last());
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut cursor = Cursor::new(4);
        for _ in 0..10 {
            cursor.next();
        }
        assert_eq!(cursor.index(), 3);
        assert!(cursor.is_last());
    }

    #[test]
    fn test_jump_out_of_range_is_noop() {
        let mut cursor = Cursor::new(4);
        assert!(cursor.jump_to(2));
        assert!(!cursor.jump_to(4));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_empty_sequence_stays_at_zero() {
        let mut cursor = Cursor::new(0);
        cursor.next();
        cursor.prev();
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.jump_to(0));
    }
}
