use serde::{Deserialize, Deserializer, Serialize};

/// Os três campos livres de um relatório, como vêm da persistência.
/// Nada garante que o conteúdo de cada campo corresponda ao nome.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RawReportFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub observacao: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub escalas: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub repertorio: String,
}

impl RawReportFields {
    pub fn new(
        observacao: impl Into<String>,
        escalas: impl Into<String>,
        repertorio: impl Into<String>,
    ) -> Self {
        RawReportFields {
            observacao: observacao.into(),
            escalas: escalas.into(),
            repertorio: repertorio.into(),
        }
    }
}

// A API devolve `null` em campos nunca preenchidos
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
