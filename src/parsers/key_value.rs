use crate::model::entry::KeyValueEntry;

/// Tamanho máximo de um rótulo, em caracteres, contando a maiúscula inicial.
pub const MAX_LABEL_LEN: usize = 120;

/// Rótulo usado quando nenhum par "Rótulo: valor" é encontrado.
pub const FALLBACK_LABEL: &str = "Escalas";

/// Bullets, quebras de linha e espaços repetidos viram um único espaço.
pub fn collapse(text: &str) -> String {
    text.replace('•', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extrator genérico para exibição: nunca devolve vazio para texto não vazio.
pub fn extract_key_values(text: &str) -> Vec<KeyValueEntry> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = collapse(text);

    let pairs = extract_label_runs(&cleaned, 1);
    if !pairs.is_empty() {
        return pairs;
    }

    vec![KeyValueEntry {
        chave: FALLBACK_LABEL.to_string(),
        valor: cleaned,
    }]
}

/// Varre sequências "Rótulo: valor Rótulo2: valor2".
///
/// Um rótulo começa numa letra maiúscula (acentuadas incluídas) que não está
/// no meio de uma palavra, não contém `:` e tem entre `min_label_len` e
/// [`MAX_LABEL_LEN`] caracteres. O valor vai até o próximo rótulo precedido
/// de espaço, ou até o fim do texto.
pub fn extract_label_runs(text: &str, min_label_len: usize) -> Vec<KeyValueEntry> {
    let chars: Vec<char> = text.chars().collect();
    let mut offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    offsets.push(text.len());

    let n = chars.len();
    let min_len = min_label_len.max(1);

    // Índice (em chars) do ':' que fecha um rótulo começando em `i`
    let label_at = |i: usize| -> Option<usize> {
        let first = chars[i];
        if !first.is_uppercase() {
            return None;
        }
        if i > 0 && chars[i - 1].is_alphanumeric() {
            return None;
        }

        let limit = (i + MAX_LABEL_LEN).min(n.saturating_sub(1));
        (i + 1..=limit)
            .find(|&c| chars[c] == ':')
            .filter(|&c| c - i >= min_len)
    };

    let mut out = Vec::new();
    let mut current = (0..n).find_map(|j| label_at(j).map(|c| (j, c)));

    while let Some((start, colon)) = current {
        let value_start = colon + 1;

        let next = (value_start + 1..n).find_map(|j| {
            if chars[j - 1].is_whitespace() {
                label_at(j).map(|c| (j, c))
            } else {
                None
            }
        });

        let value_end = next.map(|(j, _)| j).unwrap_or(n);

        out.push(KeyValueEntry {
            chave: text[offsets[start]..offsets[colon]].trim().to_string(),
            valor: text[offsets[value_start]..offsets[value_end]]
                .trim()
                .to_string(),
        });

        current = next;
    }

    out
}
