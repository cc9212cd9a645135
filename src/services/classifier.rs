//! Classificação heurística de texto livre em escala / repertório / observação.
//!
//! Cada categoria tem uma lista de sondas nomeadas; a categoria é aceita
//! quando o número de sondas que casam atinge o limiar dela.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Scale,
    Repertoire,
    Observation,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Scale, Category::Repertoire, Category::Observation];

    /// Observação usa sondas mais específicas: um acerto basta.
    pub fn threshold(self) -> usize {
        match self {
            Category::Scale => 2,
            Category::Repertoire => 2,
            Category::Observation => 1,
        }
    }
}

#[derive(Debug)]
pub struct Probe {
    pub name: &'static str,
    pub category: Category,
    re: Regex,
}

impl Probe {
    pub fn hits(&self, text: &str) -> bool {
        self.re.is_match(text)
    }
}

fn probe(category: Category, name: &'static str, pattern: &str) -> Probe {
    Probe {
        name,
        category,
        re: Regex::new(pattern).expect("probe regex"),
    }
}

static PROBES: Lazy<Vec<Probe>> = Lazy::new(|| {
    use Category::*;
    vec![
        probe(Scale, "escala_de_nota", r"(?i)escala de (dó|ré|mi|fá|sol|lá|si)"),
        probe(Scale, "arpejo", r"(?i)arpejo"),
        probe(Scale, "maior_menor", r"(?i)maior|menor"),
        probe(Scale, "marcador_escala", r"ESCALA:"),
        // [[:word:]] é só ASCII: 'Dó Maior' não conta como título entre aspas
        probe(Repertoire, "titulo_entre_aspas", r#"['"][[:word:]\s]+['"]"#),
        probe(Repertoire, "tocada_executada", r"(?i)tocada|executada"),
        probe(
            Repertoire,
            "palavra_de_repertorio",
            r"(?i)música|musette|minueto|gavotte|remando|trumpet",
        ),
        probe(Repertoire, "lista_numerada", r"(?m)^\d+\."),
        probe(
            Observation,
            "verbo_de_avaliacao",
            r"(?i)demonstrou|obteve|precisa melhorar|teve|apresentou",
        ),
        probe(Observation, "substantivo_de_progresso", r"(?i)desempenho|evolução|progresso"),
    ]
});

pub fn probes(category: Category) -> impl Iterator<Item = &'static Probe> {
    PROBES.iter().filter(move |p| p.category == category)
}

pub fn matched_probes(text: &str, category: Category) -> Vec<&'static str> {
    probes(category)
        .filter(|p| p.hits(text))
        .map(|p| p.name)
        .collect()
}

pub fn score(text: &str, category: Category) -> usize {
    if text.is_empty() {
        return 0;
    }
    probes(category).filter(|p| p.hits(text)).count()
}

pub fn matches(text: &str, category: Category) -> bool {
    score(text, category) >= category.threshold()
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Número de sondas que casaram (confiança)
    pub hits: usize,
}

/// Melhor categoria que atinge o próprio limiar. Empate: ordem de [`Category::ALL`].
pub fn classify(text: &str) -> Option<Classification> {
    let mut best: Option<Classification> = None;

    for category in Category::ALL {
        let hits = score(text, category);
        if hits < category.threshold() {
            continue;
        }
        if best.map_or(true, |b| hits > b.hits) {
            best = Some(Classification { category, hits });
        }
    }

    best
}
