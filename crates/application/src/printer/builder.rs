/// Receipt paper is 58mm: 32 characters per line in the default font.
pub const LINE_WIDTH: usize = 32;

/// Byte-level ESC/POS builder for thermal receipts.
pub struct ReceiptBuilder {
    buffer: Vec<u8>,
}

impl ReceiptBuilder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn initialize(mut self) -> Self {
        // ESC @: Initialize printer
        self.buffer.extend_from_slice(&[0x1B, 0x40]);
        self
    }

    pub fn align_center(mut self) -> Self {
        // ESC a n: Align (0: Left, 1: Center, 2: Right)
        self.buffer.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    pub fn align_left(mut self) -> Self {
        self.buffer.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    pub fn bold(mut self, on: bool) -> Self {
        // ESC E n: Emphasis
        self.buffer
            .extend_from_slice(&[0x1B, 0x45, if on { 0x01 } else { 0x00 }]);
        self
    }

    pub fn double_size(mut self, on: bool) -> Self {
        // GS ! n: character size (0x11 doubles width and height)
        self.buffer
            .extend_from_slice(&[0x1D, 0x21, if on { 0x11 } else { 0x00 }]);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.buffer.extend_from_slice(text.as_bytes());
        self
    }

    pub fn text_line(mut self, text: &str) -> Self {
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.push(0x0A); // LF
        self
    }

    pub fn empty_line(mut self) -> Self {
        self.buffer.push(0x0A);
        self
    }

    pub fn separator(self) -> Self {
        self.text_line(&"-".repeat(LINE_WIDTH))
    }

    /// "Key         : Value" line
    pub fn kv(self, key: &str, value: &str) -> Self {
        let line = format!("{:<12}: {}", key, value);
        self.text_line(&line)
    }

    pub fn feed(mut self, n: u8) -> Self {
        // ESC d n: Print and feed n lines
        self.buffer.extend_from_slice(&[0x1B, 0x64, n]);
        self
    }

    pub fn cut(mut self) -> Self {
        // GS V m: Feed to cut position and cut
        self.buffer.extend_from_slice(&[0x1D, 0x56, 66, 0]);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ReceiptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
