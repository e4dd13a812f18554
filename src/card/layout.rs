use super::measure::{FontSpec, TextMeasurer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRule {
    pub start_size: f32,
    pub step: f32,
    pub floor: f32,
    pub max_width: f32,
}

/// Shrink `font` from `rule.start_size` in `rule.step` decrements until
/// `text` fits `rule.max_width` or the floor is reached. Text that still
/// overflows at the floor is left as is.
pub fn fit_font_size(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: FontSpec,
    rule: FitRule,
) -> f32 {
    let mut size = rule.start_size;
    while measurer.measure(text, &font.with_size(size)) > rule.max_width && size > rule.floor {
        size = (size - rule.step).max(rule.floor);
    }
    size
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: f32,
}

/// Greedy line breaking: a word joins the current line while the line still
/// measures within `max_width`; otherwise the line is flushed and the word
/// starts the next one. A single word wider than `max_width` gets a line of
/// its own and is never split.
pub fn wrap_words(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if measurer.measure(&candidate, font) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Assign baselines starting at `first_y`, `line_height` apart.
pub fn place_lines(lines: Vec<String>, first_y: f32, line_height: f32) -> Vec<PlacedLine> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            y: first_y + i as f32 * line_height,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::measure::{FixedAdvance, FontFace, FontFamily};

    const TITLE_RULE: FitRule = FitRule {
        start_size: 90.0,
        step: 5.0,
        floor: 30.0,
        max_width: 900.0,
    };

    fn serif_bold() -> FontSpec {
        FontSpec::new(FontFamily::Serif, FontFace::Bold, 90.0)
    }

    fn body_font() -> FontSpec {
        FontSpec::new(FontFamily::Serif, FontFace::Italic, 40.0)
    }

    #[test]
    fn test_short_title_keeps_start_size() {
        let size = fit_font_size(
            &FixedAdvance::default(),
            "EM CONSTRUÇÃO",
            serif_bold(),
            TITLE_RULE,
        );
        assert_eq!(size, 90.0);
    }

    #[test]
    fn test_long_title_shrinks_until_it_fits() {
        let measurer = FixedAdvance::default();
        let title = "VISIONÁRIO INTERNACIONAL"; // 24 chars
        let size = fit_font_size(&measurer, title, serif_bold(), TITLE_RULE);
        // 24 * 0.5 * size <= 900  =>  size <= 75
        assert_eq!(size, 75.0);
        assert!(measurer.measure(title, &serif_bold().with_size(size)) <= 900.0);
        assert!(measurer.measure(title, &serif_bold().with_size(size + 5.0)) > 900.0);
    }

    #[test]
    fn test_title_never_below_floor() {
        let measurer = FixedAdvance::default();
        let title = "X".repeat(200);
        let size = fit_font_size(&measurer, &title, serif_bold(), TITLE_RULE);
        assert_eq!(size, 30.0);
        // still overflowing at the floor is accepted
        assert!(measurer.measure(&title, &serif_bold().with_size(size)) > 900.0);
    }

    #[test]
    fn test_uneven_step_clamps_to_floor() {
        let rule = FitRule {
            start_size: 33.0,
            step: 5.0,
            floor: 30.0,
            max_width: 10.0,
        };
        let size = fit_font_size(&FixedAdvance::default(), "abcdef", serif_bold(), rule);
        assert_eq!(size, 30.0);
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let measurer = FixedAdvance::default();
        let text =
            "Você tem boas noções, mas ainda há riscos ocultos em sua estratégia de internacionalização.";
        let lines = wrap_words(&measurer, text, &body_font(), 400.0);
        assert!(lines.len() > 1);
        for line in &lines {
            let single_word = !line.contains(' ');
            assert!(
                single_word || measurer.measure(line, &body_font()) <= 400.0,
                "{line}"
            );
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_is_greedy() {
        let measurer = FixedAdvance::default();
        // each char is 20 wide; max 100 => 5 chars per line
        let lines = wrap_words(&measurer, "aa bb cc dd", &body_font(), 100.0);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn test_wrap_keeps_overlong_word_intact() {
        let measurer = FixedAdvance::default();
        let lines = wrap_words(&measurer, "um internacionalização dois", &body_font(), 100.0);
        assert_eq!(lines, vec!["um", "internacionalização", "dois"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        let lines = wrap_words(&FixedAdvance::default(), "   ", &body_font(), 100.0);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_place_lines_advances_cursor() {
        let placed = place_lines(vec!["a".into(), "b".into(), "c".into()], 1150.0, 60.0);
        let ys: Vec<f32> = placed.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![1150.0, 1210.0, 1270.0]);
    }
}
