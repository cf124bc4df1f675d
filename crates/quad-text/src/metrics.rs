use crate::dictionary::FontDictionary;

/// Per-string extents relative to the baseline, one entry per measured string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements {
    pub widths: Vec<i32>,
    pub tops: Vec<i32>,
    pub bottoms: Vec<i32>,
}

impl Measurements {
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Vertical extent `bottom - top` of string `i`.
    pub fn height(&self, i: usize) -> i32 {
        self.bottoms[i] - self.tops[i]
    }
}

/// Measure the width and vertical extent of each string.
///
/// Characters missing from the dictionary are skipped. Spaces add width but
/// never move the top or bottom, and both extents start at the baseline.
pub fn measure<S: AsRef<str>>(strings: &[S], dictionary: &FontDictionary) -> Measurements {
    let mut out = Measurements {
        widths: Vec::with_capacity(strings.len()),
        tops: Vec::with_capacity(strings.len()),
        bottoms: Vec::with_capacity(strings.len()),
    };

    for text in strings {
        let (mut width, mut top, mut bottom) = (0, 0, 0);
        for ch in text.as_ref().chars() {
            let Some(glyph) = dictionary.get(ch) else {
                continue;
            };
            width += glyph.width;
            if ch != ' ' {
                top = top.min(glyph.top_coord);
                bottom = bottom.max(glyph.bottom_coord);
            }
        }
        out.widths.push(width);
        out.tops.push(top);
        out.bottoms.push(bottom);
    }
    out
}

/// Smallest equal card size `(width, height)` that fits every string.
pub fn flashcard_size<S: AsRef<str>>(strings: &[S], dictionary: &FontDictionary) -> (i32, i32) {
    let m = measure(strings, dictionary);
    let width = m.widths.iter().copied().max().unwrap_or(0);
    let height = (0..m.len()).map(|i| m.height(i)).max().unwrap_or(0);
    (width, height)
}
