//=========================================================================
// Font Face
//=========================================================================
//
// Narrow font contract scenes can rely on, independent of the text
// rendering backend. Backends implement it on their own font handle.
//
//=========================================================================

/// Size of a laid-out run of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Text measurement operations of a font handle.
pub trait FontFace {
    /// Measures `text` rendered at `size` points on a single line.
    fn measure(&self, text: &str, size: f32) -> TextExtent;

    /// Distance between consecutive baselines at `size` points.
    fn line_height(&self, size: f32) -> f32;

    /// Measures multi-line `text`: widest line by summed line heights.
    fn measure_lines(&self, text: &str, size: f32) -> TextExtent {
        let mut extent = TextExtent::default();
        for line in text.lines() {
            extent.width = extent.width.max(self.measure(line, size).width);
            extent.height += self.line_height(size);
        }
        extent
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
