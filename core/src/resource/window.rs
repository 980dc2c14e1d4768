// resource/window.rs
//! Fixed-capacity circular window over the most recent destuffed bytes.

#[derive(Debug, Clone)]
pub struct KeyWindow {
    buf: Box<[u8]>,
    /// Index of the oldest byte once the window is full; next write slot otherwise.
    head: usize,
    len: usize,
}

impl KeyWindow {
    pub fn new(capacity: usize) -> Self {
        Self { buf: vec![0u8; capacity].into_boxed_slice(), head: 0, len: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `b`, evicting the oldest byte when full.
    pub fn push(&mut self, b: u8) {
        let cap = self.buf.len();
        if cap == 0 {
            return;
        }
        if self.len < cap {
            self.buf[(self.head + self.len) % cap] = b;
            self.len += 1;
        } else {
            self.buf[self.head] = b;
            self.head = (self.head + 1) % cap;
        }
    }

    /// True when the window is full and equals `key` oldest-first.
    pub fn matches(&self, key: &[u8]) -> bool {
        if self.len != self.buf.len() || key.len() != self.len {
            return false;
        }
        let (tail, front) = self.buf.split_at(self.head);
        front.iter().chain(tail.iter()).eq(key.iter())
    }
}
