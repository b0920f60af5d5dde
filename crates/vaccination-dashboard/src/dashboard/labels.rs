//! Display labels for dropdown options.

/// Grammatical connectors kept in lower case unless they open the label.
const CONNECTORS: &[&str] = &[
    "em", "de", "da", "do", "dos", "das", "a", "e", "para", "por", "com", "sem", "sob", "sobre",
    "às", "ao", "aos", "as", "no", "na", "nos", "nas",
];

/// Title-cases every word except connectors that are not the first word.
pub fn format_label(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            if index > 0 && CONNECTORS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_accented_words() {
        assert_eq!(format_label("educação infantil"), "Educação Infantil");
        assert_eq!(format_label("ÉDUCAÇÃO ESPECIAL"), "Éducação Especial");
    }

    #[test]
    fn keeps_connectors_lowercase_after_first_word() {
        assert_eq!(
            format_label("ensino de jovens e adultos"),
            "Ensino de Jovens e Adultos"
        );
        assert_eq!(format_label("DE olho NA escola"), "De Olho na Escola");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(format_label("  emef   prof.  joão "), "Emef Prof. João");
        assert_eq!(format_label(""), "");
    }
}
