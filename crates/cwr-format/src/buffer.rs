//! The line buffer every record is assembled in.

/// Width of the line buffer. Wider than the widest record type.
pub const LINE_BUFFER_WIDTH: usize = 512;

/// How a value shorter than its field is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    /// Left-justify and fill with spaces.
    #[default]
    Space,
    /// Right-justify and fill with `'0'`.
    Zero,
}

impl PadMode {
    pub const fn fill(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Zero => '0',
        }
    }
}

/// A fixed-size, space-initialized character array.
///
/// Positions are character positions, not byte positions. Writes that run
/// past the end of the buffer are clipped; template geometry is checked
/// up front so a correctly configured record never clips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidthBuffer {
    cells: Vec<char>,
}

impl FixedWidthBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![' '; width],
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Write `text` into `[offset, offset + width)`.
    ///
    /// The text is cut to `width` characters (leading characters kept) and
    /// filled according to `pad`.
    pub fn write(&mut self, offset: usize, text: &str, width: usize, pad: PadMode) {
        let kept: Vec<char> = text.chars().take(width).collect();
        let fill = width - kept.len();
        let padded = match pad {
            PadMode::Space => kept
                .into_iter()
                .chain(std::iter::repeat_n(' ', fill))
                .collect::<Vec<_>>(),
            PadMode::Zero => std::iter::repeat_n('0', fill)
                .chain(kept)
                .collect::<Vec<_>>(),
        };
        for (i, ch) in padded.into_iter().enumerate() {
            if let Some(cell) = self.cells.get_mut(offset + i) {
                *cell = ch;
            }
        }
    }

    /// Characters in `[offset, offset + width)`, clipped to the buffer.
    pub fn slice(&self, offset: usize, width: usize) -> String {
        self.cells.iter().skip(offset).take(width).collect()
    }

    /// The buffer with trailing spaces removed.
    pub fn render(&self) -> String {
        let line: String = self.cells.iter().collect();
        line.trim_end_matches(' ').to_string()
    }
}

impl Default for FixedWidthBuffer {
    fn default() -> Self {
        Self::new(LINE_BUFFER_WIDTH)
    }
}
