//! Text-grid drawing surface

/// Fixed-size character grid that systems draw onto each frame.
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub const BLANK: char = ' ';

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Self::BLANK; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Self::BLANK);
    }

    /// Set one cell. Off-canvas coordinates are clipped.
    pub fn put(&mut self, x: i32, y: i32, glyph: char) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.cells[index] = glyph;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|index| self.cells[index])
    }

    /// Write `text` left to right starting at `(x, y)`, clipped at the edge.
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put(x + offset as i32, y, glyph);
        }
    }

    /// Rows joined by newlines, framed by a border.
    pub fn render(&self) -> String {
        let border = format!("+{}+", "-".repeat(self.width));
        let mut out = String::with_capacity((self.width + 3) * (self.height + 2));
        out.push_str(&border);
        out.push('\n');
        for row in self.cells.chunks(self.width.max(1)) {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }
}
