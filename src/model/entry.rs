use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScaleEntry {
    // Identificador só para endereçar linhas durante a edição; nunca persistido.
    #[serde(default = "new_scale_id")]
    pub id: String,

    #[serde(default)]
    pub nome: String,

    #[serde(default)]
    pub conteudo: String,
}

impl ScaleEntry {
    pub fn new(nome: impl Into<String>, conteudo: impl Into<String>) -> Self {
        ScaleEntry {
            id: new_scale_id(),
            nome: nome.into(),
            conteudo: conteudo.into(),
        }
    }

    pub fn blank() -> Self {
        ScaleEntry::new("", "")
    }

    /// Linha sem nome nem conteúdo (após trim) não é serializada.
    pub fn is_blank(&self) -> bool {
        self.nome.trim().is_empty() && self.conteudo.trim().is_empty()
    }

    /// Compara conteúdo ignorando o id e espaços nas bordas.
    pub fn same_content(&self, other: &ScaleEntry) -> bool {
        self.nome.trim() == other.nome.trim() && self.conteudo.trim() == other.conteudo.trim()
    }
}

pub fn new_scale_id() -> String {
    let bytes: [u8; 8] = rand::random();
    format!("escala-{}", hex::encode(bytes))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RepertoireEntry {
    #[serde(default)]
    pub nome: String,

    #[serde(default)]
    pub observacao: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct KeyValueEntry {
    #[serde(default)]
    pub chave: String,

    #[serde(default)]
    pub valor: String,
}

impl From<KeyValueEntry> for ScaleEntry {
    fn from(kv: KeyValueEntry) -> Self {
        ScaleEntry::new(kv.chave, kv.valor)
    }
}
