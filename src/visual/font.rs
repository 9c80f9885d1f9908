//! 3×5 bitmap glyphs for tick and axis labels.

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: u32 = 5;
/// Horizontal distance between glyph origins in font pixels.
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of the glyph for `ch`; `#` marks a lit pixel. Characters without a
/// glyph render as a filled box.
pub fn glyph(ch: char) -> [&'static str; 5] {
    match ch {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => ["  #", "  #", "  #", "  #", "  #"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        'A' => [" # ", "# #", "###", "# #", "# #"],
        'F' => ["###", "#  ", "## ", "#  ", "#  "],
        'H' => ["# #", "# #", "###", "# #", "# #"],
        'T' => ["###", " # ", " # ", " # ", " # "],
        'a' => ["###", "  #", "###", "# #", "###"],
        'b' => ["#  ", "#  ", "###", "# #", "###"],
        'c' => ["   ", "###", "#  ", "#  ", "###"],
        'd' => ["  #", "  #", "###", "# #", "###"],
        'e' => ["###", "# #", "###", "#  ", "###"],
        'f' => [" ##", " # ", "###", " # ", " # "],
        'g' => ["###", "# #", "###", "  #", "## "],
        'h' => ["#  ", "#  ", "###", "# #", "# #"],
        'i' => [" # ", "   ", " # ", " # ", " # "],
        'k' => ["#  ", "# #", "## ", "# #", "# #"],
        'l' => ["#  ", "#  ", "#  ", "#  ", "## "],
        'm' => ["   ", "# #", "###", "# #", "# #"],
        'n' => ["   ", "## ", "# #", "# #", "# #"],
        'o' => ["   ", "###", "# #", "# #", "###"],
        'p' => ["###", "# #", "###", "#  ", "#  "],
        'q' => ["###", "# #", "###", "  #", "  #"],
        'r' => ["   ", "## ", "#  ", "#  ", "#  "],
        's' => ["###", "#  ", "###", "  #", "###"],
        't' => [" # ", "###", " # ", " # ", " ##"],
        'u' => ["   ", "# #", "# #", "# #", "###"],
        'v' => ["   ", "# #", "# #", "# #", " # "],
        'w' => ["   ", "# #", "# #", "###", "# #"],
        'x' => ["   ", "# #", " # ", " # ", "# #"],
        'y' => ["# #", "# #", "###", "  #", "###"],
        'z' => ["###", "  #", " # ", "#  ", "###"],
        '(' => [" # ", "#  ", "#  ", "#  ", " # "],
        ')' => [" # ", "  #", "  #", "  #", " # "],
        '-' => ["   ", "   ", "###", "   ", "   "],
        '+' => ["   ", " # ", "###", " # ", "   "],
        ':' => ["   ", " # ", "   ", " # ", "   "],
        '.' => ["   ", "   ", "   ", "   ", " # "],
        ' ' => ["   ", "   ", "   ", "   ", "   "],
        _ => ["###", "###", "###", "###", "###"],
    }
}

/// Rendered width of `text` in image pixels at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale
    }
}
