use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::entry::RepertoireEntry;

// "Título": nota  |  “Título” nota
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["“]([^"“”\r\n]+)["”][ \t]*:?[ \t]*"#).expect("title regex")
});

// Numeração do próximo item que sobra no fim da nota ("... bem. 2.")
static TRAILING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)\d+\.\s*$").expect("trailing number regex"));

pub fn extract_repertoire(text: &str) -> Vec<RepertoireEntry> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let titles: Vec<_> = TITLE_RE.captures_iter(trimmed).collect();

    if titles.is_empty() {
        return vec![RepertoireEntry {
            nome: String::new(),
            observacao: trimmed.to_string(),
        }];
    }

    let mut out = Vec::with_capacity(titles.len());

    for (i, caps) in titles.iter().enumerate() {
        // get(0) sempre existe quando houve match
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let nome = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");

        let note_end = titles
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(trimmed.len());

        out.push(RepertoireEntry {
            nome: nome.to_string(),
            observacao: clean_note(&trimmed[whole.end()..note_end]),
        });
    }

    out
}

fn clean_note(raw: &str) -> String {
    let s = raw.trim();
    let s = TRAILING_NUMBER_RE.replace(s, "");

    s.trim()
        .trim_start_matches(|c: char| c == '-' || c == '–' || c == ':' || c.is_whitespace())
        .trim_end_matches(|c: char| {
            c == '.' || c == ';' || c == ',' || c == '•' || c.is_whitespace()
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[RepertoireEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.nome.as_str(), e.observacao.as_str()))
            .collect()
    }

    #[test]
    fn extracts_quoted_titles_in_order() {
        let got = extract_repertoire(
            r#""Minueto em Sol": tocada com boa dinâmica. "Musette": executada sem erros."#,
        );
        assert_eq!(
            pairs(&got),
            vec![
                ("Minueto em Sol", "tocada com boa dinâmica"),
                ("Musette", "executada sem erros"),
            ]
        );
    }

    #[test]
    fn numbered_list_markers_do_not_leak_into_notes() {
        let got = extract_repertoire("1. \"Gavotte\": ok.\n2. \"Remando\": precisa de mais estudo.");
        assert_eq!(
            pairs(&got),
            vec![("Gavotte", "ok"), ("Remando", "precisa de mais estudo")]
        );
    }

    #[test]
    fn typographic_quotes_and_missing_colon() {
        let got = extract_repertoire("“Trumpet Voluntary” tocada inteira.");
        assert_eq!(pairs(&got), vec![("Trumpet Voluntary", "tocada inteira")]);
    }

    #[test]
    fn title_without_note() {
        let got = extract_repertoire("\"Asa Branca\"");
        assert_eq!(pairs(&got), vec![("Asa Branca", "")]);
    }

    #[test]
    fn no_titles_wraps_trimmed_text() {
        let got = extract_repertoire("  estudou a peça do livro 2 \n");
        assert_eq!(pairs(&got), vec![("", "estudou a peça do livro 2")]);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(extract_repertoire("   ").is_empty());
    }
}
