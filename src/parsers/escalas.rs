use std::panic;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};

use crate::model::entry::ScaleEntry;
use crate::parsers::key_value;

pub const MARKER: &str = "ESCALA:";
pub const FIELD_SEP: char = '|';
pub const ENTRY_SEP: &str = ";";

/// Rótulo mínimo na heurística de rótulos: evita "A:" / "E:" soltos.
const LABEL_RUN_MIN_LEN: usize = 2;

// Ancorado no início do segmento; conteúdo guloso depois do primeiro '|'
static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*ESCALA:(.*?)\|(.*)$").expect("segment regex"));

static LEADING_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i:escalas|repert[óo]rio)\s*:\s*").expect("leading label regex")
});

// 1. 'Dó Maior': conteúdo
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\d+)\.\s*['"‘’“”]([^'"‘’“”]+)['"‘’“”]\s*:\s*"#).expect("numbered regex")
});

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    Empty,
    MiniFormat,
    NumberedQuotes,
    LabelRun,
    RawFallback,
}

// Ordem fixa: o primeiro que reconhece o texto vence
const CHAIN: [ParseStrategy; 4] = [
    ParseStrategy::MiniFormat,
    ParseStrategy::NumberedQuotes,
    ParseStrategy::LabelRun,
    ParseStrategy::RawFallback,
];

impl ParseStrategy {
    /// `raw` é o texto original; `cleaned` já passou por [`clean_legacy`].
    pub fn attempt(self, raw: &str, cleaned: &str) -> Option<Vec<ScaleEntry>> {
        match self {
            ParseStrategy::Empty => None,
            ParseStrategy::MiniFormat => try_mini_format(raw),
            ParseStrategy::NumberedQuotes => try_numbered_quotes(cleaned),
            ParseStrategy::LabelRun => try_label_run(cleaned),
            ParseStrategy::RawFallback => Some(raw_fallback(cleaned)),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ParsedScales {
    pub strategy: ParseStrategy,
    pub entries: Vec<ScaleEntry>,
}

pub fn stringify(entries: &[ScaleEntry]) -> String {
    entries
        .iter()
        .filter(|e| !e.is_blank())
        .map(|e| format!("{MARKER}{}{FIELD_SEP}{}", e.nome.trim(), e.conteudo.trim()))
        .collect::<Vec<_>>()
        .join(ENTRY_SEP)
}

/// Lê a lista de escalas de um campo, em qualquer um dos formatos conhecidos.
///
/// Nunca falha: se algo inesperado acontecer, loga e devolve lista vazia.
pub fn parse(raw: &str) -> Vec<ScaleEntry> {
    match panic::catch_unwind(|| parse_with_strategy(raw)) {
        Ok(parsed) => parsed.entries,
        Err(_) => {
            error!(len = raw.len(), "failed to parse scale list");
            Vec::new()
        }
    }
}

pub fn parse_with_strategy(raw: &str) -> ParsedScales {
    if raw.trim().is_empty() {
        return ParsedScales {
            strategy: ParseStrategy::Empty,
            entries: Vec::new(),
        };
    }

    let cleaned = clean_legacy(raw);

    let (strategy, entries) = CHAIN
        .iter()
        .find_map(|&s| s.attempt(raw, &cleaned).map(|e| (s, e)))
        .unwrap_or((ParseStrategy::RawFallback, Vec::new()));

    debug!(?strategy, count = entries.len(), "parsed scale list");

    ParsedScales { strategy, entries }
}

pub fn is_mini_format(text: &str) -> bool {
    text.contains(MARKER) && text.contains(FIELD_SEP)
}

/// Separa um segmento `ESCALA:nome|conteudo` em (nome, conteudo), sem trim.
pub fn match_segment(segment: &str) -> Option<(&str, &str)> {
    let caps = SEGMENT_RE.captures(segment)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

pub fn try_mini_format(raw: &str) -> Option<Vec<ScaleEntry>> {
    if !is_mini_format(raw) {
        return None;
    }

    let entries = raw
        .split(ENTRY_SEP)
        .filter(|s| !s.trim().is_empty())
        .map(|segment| match match_segment(segment) {
            Some((nome, conteudo)) => ScaleEntry::new(nome.trim(), conteudo.trim()),
            // Segmento fora do padrão: preserva o texto inteiro
            None => ScaleEntry::new("", segment.trim()),
        })
        .collect();

    Some(entries)
}

/// Limpeza comum aos formatos antigos: bullets, CR e rótulo inicial.
pub fn clean_legacy(raw: &str) -> String {
    let s: String = raw.chars().filter(|&c| c != '•' && c != '\r').collect();
    LEADING_LABEL_RE.replace(&s, "").trim().to_string()
}

pub fn try_numbered_quotes(cleaned: &str) -> Option<Vec<ScaleEntry>> {
    let heads: Vec<_> = NUMBERED_RE.captures_iter(cleaned).collect();
    let first = heads.first()?.get(0)?;

    let mut entries = Vec::with_capacity(heads.len() + 1);

    // Texto solto antes do primeiro item vira uma entrada sem nome, para não
    // se perder; se for só um título ("...:") é descartado como o rótulo.
    let preamble = cleaned[..first.start()].trim();
    if !preamble.is_empty() && !preamble.ends_with(':') {
        entries.push(ScaleEntry::new("", preamble));
    }

    for (i, caps) in heads.iter().enumerate() {
        let (Some(whole), Some(nome)) = (caps.get(0), caps.get(2)) else {
            continue;
        };

        let end = heads
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(cleaned.len());

        let conteudo = cleaned[whole.end()..end]
            .trim()
            .trim_end_matches('.')
            .trim_end();

        entries.push(ScaleEntry::new(nome.as_str().trim(), conteudo));
    }

    Some(entries)
}

pub fn try_label_run(cleaned: &str) -> Option<Vec<ScaleEntry>> {
    let flat = key_value::collapse(cleaned);
    let pairs = key_value::extract_label_runs(&flat, LABEL_RUN_MIN_LEN);

    if pairs.is_empty() {
        return None;
    }

    Some(pairs.into_iter().map(ScaleEntry::from).collect())
}

/// Último recurso: sempre uma entrada, mesmo que a limpeza tenha levado tudo
/// (`"•"`, `"Escalas:"`). Texto bruto em branco nem chega aqui.
pub fn raw_fallback(cleaned: &str) -> Vec<ScaleEntry> {
    vec![ScaleEntry::new("", cleaned.trim())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[ScaleEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.nome.as_str(), e.conteudo.as_str()))
            .collect()
    }

    #[test]
    fn mini_format_has_priority() {
        let parsed = parse_with_strategy("ESCALA:Dó Maior|Dó Ré Mi;ESCALA:Sol Maior|Sol Lá Si");
        assert_eq!(parsed.strategy, ParseStrategy::MiniFormat);
        assert_eq!(
            pairs(&parsed.entries),
            vec![("Dó Maior", "Dó Ré Mi"), ("Sol Maior", "Sol Lá Si")]
        );
    }

    #[test]
    fn mini_format_content_is_greedy_after_first_pipe() {
        let got = parse("ESCALA:Lá menor|harmônica | melódica\n2 oitavas");
        assert_eq!(pairs(&got), vec![("Lá menor", "harmônica | melódica\n2 oitavas")]);
    }

    #[test]
    fn mini_format_keeps_unmatched_segments() {
        let got = parse("ESCALA:Fá Maior|ok;; revisar arpejos ;");
        assert_eq!(pairs(&got), vec![("Fá Maior", "ok"), ("", "revisar arpejos")]);
    }

    #[test]
    fn mini_format_allows_blank_side() {
        let got = parse("ESCALA:|só conteúdo;ESCALA:Só nome|");
        assert_eq!(pairs(&got), vec![("", "só conteúdo"), ("Só nome", "")]);
    }

    #[test]
    fn numbered_quotes_legacy_format() {
        let parsed =
            parse_with_strategy("1. 'Dó Maior': arpejo trabalhado. 2. 'Sol Maior': escala trabalhada.");
        assert_eq!(parsed.strategy, ParseStrategy::NumberedQuotes);
        assert_eq!(
            pairs(&parsed.entries),
            vec![("Dó Maior", "arpejo trabalhado"), ("Sol Maior", "escala trabalhada")]
        );
    }

    #[test]
    fn numbered_quotes_drop_label_and_bullets() {
        let got = parse("Escalas:\r\n• 1. \"Ré Maior\": duas oitavas.\r\n• 2. \"Si menor\": lenta.");
        assert_eq!(pairs(&got), vec![("Ré Maior", "duas oitavas"), ("Si menor", "lenta")]);
    }

    #[test]
    fn numbered_quotes_keep_preamble_text() {
        let got = parse("aula curta 1. 'Mi Maior': ok.");
        assert_eq!(pairs(&got), vec![("", "aula curta"), ("Mi Maior", "ok")]);
    }

    #[test]
    fn label_run_legacy_format() {
        let parsed = parse_with_strategy("• Dó Maior: 2 oitavas\n• Arpejo de Ré: mãos separadas");
        assert_eq!(parsed.strategy, ParseStrategy::LabelRun);
        assert_eq!(
            pairs(&parsed.entries),
            vec![("Dó Maior", "2 oitavas"), ("Arpejo de Ré", "mãos separadas")]
        );
    }

    #[test]
    fn label_run_ignores_single_letter_labels() {
        let parsed = parse_with_strategy("nota A: afinada");
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(pairs(&parsed.entries), vec![("", "nota A: afinada")]);
    }

    #[test]
    fn raw_fallback_wraps_cleaned_text() {
        let parsed = parse_with_strategy("Repertório: trabalhou escalas maiores\ncom metrônomo");
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(
            pairs(&parsed.entries),
            vec![("", "trabalhou escalas maiores\ncom metrônomo")]
        );
    }

    #[test]
    fn text_that_cleans_to_nothing_still_yields_one_entry() {
        for raw in ["•", "Escalas:", "• • •", "\r•\r"] {
            let parsed = parse_with_strategy(raw);
            assert_eq!(parsed.strategy, ParseStrategy::RawFallback, "{raw:?}");
            assert_eq!(pairs(&parsed.entries), vec![("", "")], "{raw:?}");
        }
        assert_eq!(parse("Repertório:").len(), 1);
    }

    #[test]
    fn blank_input_parses_to_empty() {
        assert!(parse("").is_empty());
        assert!(parse("  \n ").is_empty());
        assert_eq!(parse_with_strategy(" ").strategy, ParseStrategy::Empty);
    }

    #[test]
    fn stringify_drops_blank_entries() {
        assert_eq!(stringify(&[ScaleEntry::new("", "")]), "");
        assert_eq!(
            stringify(&[
                ScaleEntry::new(" Dó Maior ", " Dó Ré Mi "),
                ScaleEntry::new(" ", "\n"),
                ScaleEntry::new("", "só conteúdo"),
            ]),
            "ESCALA:Dó Maior|Dó Ré Mi;ESCALA:|só conteúdo"
        );
    }

    #[test]
    fn round_trip_preserves_content_and_order() {
        let samples = vec![
            vec![ScaleEntry::new("Dó Maior", "Dó Ré Mi Fá Sol")],
            vec![
                ScaleEntry::new("Sol Maior", "duas oitavas, mãos juntas"),
                ScaleEntry::new("Mi menor", "harmônica\nmelódica"),
                ScaleEntry::new("Arpejo: Ré", "staccato"),
            ],
            vec![
                ScaleEntry::new(" Lá menor ", " lenta "),
                ScaleEntry::new("Fá Maior", "1. 'x': y"),
            ],
        ];

        for entries in samples {
            let text = stringify(&entries);
            let back = parse(&text);

            assert_eq!(back.len(), entries.len(), "{text}");
            for (a, b) in entries.iter().zip(back.iter()) {
                assert!(a.same_content(b), "{a:?} != {b:?}");
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn ids_are_regenerated_on_every_parse() {
        let a = parse("ESCALA:Dó|x");
        let b = parse("ESCALA:Dó|x");
        assert_ne!(a[0].id, b[0].id);
    }
}
