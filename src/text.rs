use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const LOWERCASE_WORDS: [&str; 15] = [
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "in", "of",
];

pub const MAX_CATEGORIES: usize = 3;

pub fn normalize_title(text: &str) -> String {
    text.split(' ')
        .enumerate()
        .map(|(index, word)| {
            let lower = word.to_lowercase();
            if index == 0 || !LOWERCASE_WORDS.contains(&lower.as_str()) {
                capitalize(word)
            } else {
                lower
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

// `Fiction/Literary` keeps only `Fiction`.
pub fn process_categories(categories: Option<&[String]>) -> Vec<String> {
    let Some(categories) = categories else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(MAX_CATEGORIES);
    for category in categories {
        let label = match category.split_once('/') {
            Some((top, _)) => normalize_title(top.trim()),
            None => normalize_title(category),
        };
        if seen.insert(label.clone()) {
            out.push(label);
            if out.len() == MAX_CATEGORIES {
                break;
            }
        }
    }
    out
}

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script regex"));
static IFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe\s*>").expect("valid iframe regex"));
// Handlers may follow whitespace, `/` or a closing quote.
static EVENT_HANDLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s*\bon\w+\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid handler regex")
});

// Denylist only: `javascript:` URLs pass through untouched.
pub fn sanitize_html(html: &str) -> String {
    let mut current = strip_dangerous(html);
    // A removal can splice a new tag together out of the surrounding text.
    loop {
        let next = strip_dangerous(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_dangerous(html: &str) -> String {
    let s = SCRIPT_RE.replace_all(html, "");
    let s = IFRAME_RE.replace_all(&s, "");
    EVENT_HANDLER_RE.replace_all(&s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_keeps_connectors_lowercase() {
        assert_eq!(
            normalize_title("the lord of the rings"),
            "The Lord of the Rings"
        );
        assert_eq!(normalize_title("A TALE OF TWO CITIES"), "A Tale of Two Cities");
        assert_eq!(normalize_title("of mice and men"), "Of Mice and Men");
    }

    #[test]
    fn title_normalization_is_idempotent() {
        for input in ["the lord of the rings", "WAR AND PEACE", "gone with the wind", "x"] {
            let once = normalize_title(input);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn title_preserves_space_runs_and_empty_input() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("dune  messiah"), "Dune  Messiah");
        assert_eq!(normalize_title("catch-22 novel"), "Catch-22 Novel");
    }

    #[test]
    fn categories_keep_top_segment_and_dedupe() {
        let input = strings(&["Fiction/Literary", "Fiction/Mystery", "Drama"]);
        assert_eq!(process_categories(Some(input.as_slice())), vec!["Fiction", "Drama"]);
    }

    #[test]
    fn categories_absent_or_empty_yield_nothing() {
        assert!(process_categories(None).is_empty());
        assert!(process_categories(Some(&[] as &[String])).is_empty());
    }

    #[test]
    fn categories_are_capped_at_three() {
        let input = strings(&["History", "science", "ART / Modern", "Poetry", "Travel"]);
        let out = process_categories(Some(input.as_slice()));
        assert_eq!(out, vec!["History", "Science", "Art"]);
    }

    #[test]
    fn categories_dedupe_after_normalization() {
        let input = strings(&["juvenile fiction", "Juvenile Fiction/General", "COMICS"]);
        assert_eq!(
            process_categories(Some(input.as_slice())),
            vec!["Juvenile Fiction", "Comics"]
        );
    }

    #[test]
    fn sanitizer_drops_scripts() {
        assert_eq!(
            sanitize_html("<p>ok</p><script>alert(1)</script>"),
            "<p>ok</p>"
        );
        assert_eq!(
            sanitize_html("<p>a</p><SCRIPT type=\"x\">\nlet a = 1;\n</Script><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn sanitizer_is_non_greedy_across_blocks() {
        let html = "<script>one()</script><b>keep</b><script>two()</script>";
        assert_eq!(sanitize_html(html), "<b>keep</b>");
    }

    #[test]
    fn sanitizer_drops_iframes() {
        let html = "<p>x</p><iframe src=\"https://evil.example\">\n</iframe><p>y</p>";
        assert_eq!(sanitize_html(html), "<p>x</p><p>y</p>");
    }

    #[test]
    fn sanitizer_strips_event_handlers() {
        assert_eq!(sanitize_html(r#"<div onclick="evil()">x</div>"#), "<div>x</div>");
        assert_eq!(
            sanitize_html(r#"<img src="a.png" onError='boom()' alt="a">"#),
            r#"<img src="a.png" alt="a">"#
        );
    }

    #[test]
    fn sanitizer_strips_handlers_after_slash_or_quote() {
        assert_eq!(sanitize_html(r#"<svg/onload="alert(1)">"#), "<svg/>");
        assert_eq!(
            sanitize_html(r#"<img src="x"onerror="steal()">"#),
            r#"<img src="x">"#
        );
        assert_eq!(
            sanitize_html("<a href=\"#\"\nONMOUSEOVER='x()'>hi</a>"),
            "<a href=\"#\">hi</a>"
        );
    }

    #[test]
    fn sanitizer_catches_blocks_spliced_by_removal() {
        assert_eq!(
            sanitize_html("<p>a</p><scr<script></script>ipt>alert(1)</script><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(
            sanitize_html("<ifr<script>x</script>ame src=\"e\"></iframe>ok"),
            "ok"
        );
    }

    #[test]
    fn sanitizer_keeps_words_starting_with_on_in_text() {
        let html = "<p>Button online, once upon a time.</p>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn sanitizer_leaves_plain_markup_alone() {
        let html = "<p>Once <i>upon</i> a time, on a hill.</p><br>";
        assert_eq!(sanitize_html(html), html);
    }
}
