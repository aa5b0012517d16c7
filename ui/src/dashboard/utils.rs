/// Fallback accent when a topic has no dedicated colour.
pub const DEFAULT_ACCENT: &str = "#2563eb";
pub const BASELINE_FILL: &str = "#d1d5db";

pub fn accent_for(topic_id: &str) -> &'static str {
    match topic_id {
        "phaco" => "#2563eb",
        "presbyopia" => "#7c3aed",
        "astigmatism" => "#0ea5e9",
        "refractive_surgery" => "#10b981",
        "ocular_surface" => "#f59e0b",
        "glaucoma" => "#ef4444",
        "retina" => "#8b5cf6",
        _ => DEFAULT_ACCENT,
    }
}

/// Round the tallest bar up to a readable axis ceiling.
pub(crate) fn nice_ceiling(max_pct: f64) -> f64 {
    const STEPS: [f64; 7] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0];
    STEPS
        .iter()
        .copied()
        .find(|step| max_pct <= *step)
        .unwrap_or(100.0)
}

/// Break an axis label into at most `max_lines` lines of `max_chars` characters.
///
/// Words wrap on spaces and after hyphens inside a word, and a single word
/// longer than a line is split with a trailing hyphen. Dropped text is marked with `…`.
pub(crate) fn wrap_label(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(2);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for Segment { text: segment, attach } in label_segments(text.trim(), max_chars) {
        if lines.len() >= max_lines {
            truncated = true;
            break;
        }

        let candidate = if current.is_empty() {
            segment.clone()
        } else if attach {
            format!("{current}{segment}")
        } else {
            format!("{current} {segment}")
        };

        if char_len(&candidate) <= max_chars {
            current = candidate;
            continue;
        }

        if current.is_empty() {
            for piece in hard_split(&segment, max_chars) {
                if lines.len() < max_lines {
                    lines.push(piece);
                } else {
                    truncated = true;
                }
            }
            continue;
        }

        lines.push(std::mem::replace(&mut current, segment));
    }

    if !current.is_empty() {
        if lines.len() < max_lines {
            lines.push(current);
        } else {
            truncated = true;
        }
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(last, max_chars);
        }
    }

    lines
}

/// One wrappable piece of a label. `attach` pieces continue the previous piece without a space.
struct Segment {
    text: String,
    attach: bool,
}

/// Split on whitespace, then after every hyphen inside a word.
fn label_segments(text: &str, max_chars: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    for word in text.split_whitespace() {
        let mut attach = false;
        for piece in word.split_inclusive('-') {
            let pieces = if char_len(piece) > max_chars {
                hard_split(piece, max_chars)
            } else {
                vec![piece.to_string()]
            };
            for text in pieces {
                segments.push(Segment { text, attach });
                attach = true;
            }
        }
    }
    segments
}

fn hard_split(token: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    let mut pieces = Vec::new();
    let mut start = 0;
    while chars.len() - start > max_chars {
        let end = start + max_chars - 1;
        let mut piece: String = chars[start..end].iter().collect();
        piece.push('-');
        pieces.push(piece);
        start = end;
    }
    if start < chars.len() {
        pieces.push(chars[start..].iter().collect());
    }
    pieces
}

fn ellipsize(line: &str, max_chars: usize) -> String {
    if char_len(line) > max_chars - 1 {
        let kept: String = line.chars().take(max_chars - 1).collect();
        format!("{kept}…")
    } else {
        format!("{line}…")
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_stay_on_one_line() {
        assert_eq!(wrap_label("  Yes ", 18, 4), vec!["Yes"]);
        assert!(wrap_label("", 18, 4).is_empty());
    }

    #[test]
    fn hyphens_bind_to_the_previous_word() {
        assert_eq!(
            wrap_label("Wavefront-optimized LASIK", 18, 4),
            vec!["Wavefront-", "optimized LASIK"]
        );
        assert_eq!(wrap_label("Toric-IOL", 18, 4), vec!["Toric-IOL"]);
    }

    #[test]
    fn leading_hyphen_keeps_the_space_before_it() {
        assert_eq!(wrap_label("a -b", 18, 4), vec!["a -b"]);
        assert_eq!(wrap_label("Yes - always", 18, 4), vec!["Yes - always"]);
        assert_eq!(wrap_label("Mono- or toric", 18, 4), vec!["Mono- or toric"]);
    }

    #[test]
    fn long_words_are_hard_split() {
        assert_eq!(
            wrap_label("supercalifragilisticexpialidocious", 18, 4),
            vec!["supercalifragilis-", "ticexpialidocious"]
        );
    }

    #[test]
    fn overflow_is_marked_with_an_ellipsis() {
        let lines = wrap_label(
            "Refractive lens exchange with multifocal intraocular lens implantation in both eyes",
            18,
            4,
        );
        assert_eq!(
            lines,
            vec![
                "Refractive lens",
                "exchange with",
                "multifocal",
                "intraocular lens…"
            ]
        );
    }

    #[test]
    fn ceiling_steps() {
        assert_eq!(nice_ceiling(0.0), 10.0);
        assert_eq!(nice_ceiling(33.3), 40.0);
        assert_eq!(nice_ceiling(74.9), 75.0);
        assert_eq!(nice_ceiling(75.1), 100.0);
    }

    #[test]
    fn unknown_topics_use_default_accent() {
        assert_eq!(accent_for("glaucoma"), "#ef4444");
        assert_eq!(accent_for("cornea"), DEFAULT_ACCENT);
    }

    #[test]
    fn xml_escaping() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
