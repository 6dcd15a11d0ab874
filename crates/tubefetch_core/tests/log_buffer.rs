use pretty_assertions::assert_eq;
use tubefetch_core::{classify_line, LineStyle, LogBuffer, StyledLine};

#[test]
fn classification_rules_apply_in_order() {
    assert_eq!(classify_line("[youtube] Extracting URL"), LineStyle::Muted);
    assert_eq!(classify_line("Progression: downloading"), LineStyle::Progress);
    assert_eq!(classify_line("erreur: timeout"), LineStyle::Error);
    assert_eq!(classify_line("Téléchargement terminé"), LineStyle::Plain);
}

#[test]
fn prefix_rule_wins_over_substrings() {
    assert_eq!(classify_line("[info] Progression: 50%"), LineStyle::Muted);
    assert_eq!(classify_line("[info] erreur"), LineStyle::Muted);
    assert_eq!(classify_line("Progression: erreur"), LineStyle::Progress);
}

#[test]
fn classification_is_case_sensitive() {
    assert_eq!(classify_line("Erreur lors du téléchargement"), LineStyle::Plain);
    assert_eq!(classify_line("progression: 10%"), LineStyle::Plain);
    assert_eq!(classify_line(" [info] leading space"), LineStyle::Plain);
}

#[test]
fn replayed_lines_are_appended_once() {
    let mut buffer = LogBuffer::new();
    assert_eq!(buffer.append_new(vec!["a".to_string()]), 1);
    assert_eq!(buffer.append_new(vec!["a".to_string(), "b".to_string()]), 1);
    assert_eq!(buffer.append_new(vec!["a".to_string(), "b".to_string()]), 0);

    let texts: Vec<_> = buffer.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
    assert!(buffer.contains("b"));
    assert!(!buffer.contains("c"));
}

#[test]
fn clear_forgets_seen_lines() {
    let mut buffer = LogBuffer::new();
    buffer.append_new(vec!["a".to_string()]);
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.append_new(vec!["a".to_string()]), 1);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn embedded_newlines_split_into_display_lines() {
    let line = StyledLine::new("Progression: first\nsecond");
    assert_eq!(line.style, LineStyle::Progress);
    assert_eq!(line.display_lines().collect::<Vec<_>>(), vec!["Progression: first", "second"]);

    let single = StyledLine::new("last");
    assert_eq!(single.display_lines().collect::<Vec<_>>(), vec!["last"]);
}
