use crate::decode::DecodeResult;
use crate::text_buffer::TextBuffer;

pub const WINDOW_SIZE: usize = 12;
pub const MAX_LABEL_SIZE: usize = 40;
pub const MAX_TEXT_SIZE: usize = 128;

/// A labelled string shown `WINDOW_SIZE` characters at a time.
///
/// The offset always stays within `[0, max(0, len - WINDOW_SIZE)]`, so the
/// visible slice is `text[offset..offset + WINDOW_SIZE]`, shorter only when
/// the whole text fits on screen.
#[derive(Debug, Default)]
pub struct PaginationWindow {
    label: TextBuffer<MAX_LABEL_SIZE>,
    text: TextBuffer<MAX_TEXT_SIZE>,
    offset: usize,
}

impl PaginationWindow {
    pub const fn new() -> Self {
        Self {
            label: TextBuffer::new(),
            text: TextBuffer::new(),
            offset: 0,
        }
    }

    pub fn clear(&mut self) {
        self.label.reset();
        self.text.reset();
        self.offset = 0;
    }

    pub fn set(&mut self, label: &[u8], text: &[u8]) -> DecodeResult<()> {
        self.clear();
        self.label.write(label)?;
        self.text.write(text)
    }

    // For labels and texts assembled from several pieces. The offset is
    // rewound since the text changes.
    pub fn compose(&mut self) -> (&mut TextBuffer<MAX_LABEL_SIZE>, &mut TextBuffer<MAX_TEXT_SIZE>) {
        self.clear();
        (&mut self.label, &mut self.text)
    }

    #[inline]
    pub fn label(&self) -> &[u8] {
        self.label.get()
    }

    #[inline]
    pub fn text(&self) -> &[u8] {
        self.text.get()
    }

    pub fn visible(&self) -> &[u8] {
        let text = self.text.get();
        let to = core::cmp::min(self.offset + WINDOW_SIZE, text.len());
        &text[self.offset..to]
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn max_offset(&self) -> usize {
        self.len().saturating_sub(WINDOW_SIZE)
    }

    #[inline]
    pub fn can_seek_left(&self) -> bool {
        self.offset > 0
    }

    #[inline]
    pub fn can_seek_right(&self) -> bool {
        self.offset < self.max_offset()
    }

    // Both return whether the window moved.
    pub fn seek_left(&mut self) -> bool {
        if !self.can_seek_left() {
            return false;
        }
        self.offset -= 1;
        true
    }

    pub fn seek_right(&mut self) -> bool {
        if !self.can_seek_right() {
            return false;
        }
        self.offset += 1;
        true
    }
}
