use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsers::escalas::{self, ENTRY_SEP};

// O '\n' opcional faz um marcador que já está no início da linha
// ser reescrito igual, e não ganhar mais uma quebra.
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?[ \t]*•[ \t]*").expect("bullet regex"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?[ \t]*(\d+)\.[ \t]*").expect("number regex"));

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// Normaliza texto livre para exibição. Idempotente.
pub fn beautify(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let s = text.replace("\r\n", "\n").replace('\r', "\n");
    let s = BULLET_RE.replace_all(&s, "\n• ");
    let s = NUMBER_RE.replace_all(&s, "\n${1}. ");

    let s = s.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    let s = BLANK_RUN_RE.replace_all(&s, "\n\n");

    s.trim().to_string()
}

/// Mini-formato → uma linha "• nome: conteudo" por escala.
///
/// `None` quando o texto não está no mini-formato (ou nenhum segmento casou);
/// nesse caso quem chama usa [`beautify`].
pub fn format_scales(text: &str) -> Option<String> {
    if !escalas::is_mini_format(text) {
        return None;
    }

    let lines: Vec<String> = text
        .split(ENTRY_SEP)
        .filter(|s| !s.trim().is_empty())
        .filter_map(escalas::match_segment)
        .map(|(nome, conteudo)| {
            let (nome, conteudo) = (nome.trim(), conteudo.trim());
            if nome.is_empty() {
                format!("• {conteudo}")
            } else {
                format!("• {nome}: {conteudo}")
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
