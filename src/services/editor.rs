//! Estado da tela de edição de escalas.
//!
//! A tela recebe o valor bruto do campo `escalas` e devolve, a cada edição,
//! o mini-formato serializado. O valor externo pode mudar depois de a tela
//! existir (registro carregado depois), então [`ScaleEditor::sync`] reanalisa
//! sempre que ele muda, e só nesse caso.

use serde::Deserialize;
use tracing::debug;

use crate::model::entry::ScaleEntry;
use crate::parsers::escalas;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleField {
    Nome,
    Conteudo,
}

#[derive(Debug, Clone)]
pub struct ScaleEditor {
    entries: Vec<ScaleEntry>,
    // último valor recebido ou emitido
    last_seen: String,
}

impl ScaleEditor {
    pub fn from_raw(raw: &str) -> Self {
        ScaleEditor {
            entries: escalas::parse(raw),
            last_seen: raw.to_string(),
        }
    }

    /// Recebe o valor externo. Devolve `true` se a lista foi reconstruída.
    ///
    /// O eco do próprio valor emitido não reanalisa, senão linhas em branco
    /// em edição sumiriam e os ids mudariam a cada tecla.
    pub fn sync(&mut self, raw: &str) -> bool {
        if raw == self.last_seen {
            return false;
        }

        self.entries = escalas::parse(raw);
        self.last_seen = raw.to_string();
        debug!(count = self.entries.len(), "scale editor resynced");
        true
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }

    pub fn serialized(&self) -> String {
        escalas::stringify(&self.entries)
    }

    pub fn add(&mut self) -> (String, String) {
        let entry = ScaleEntry::blank();
        let id = entry.id.clone();
        self.entries.push(entry);
        (id, self.emit())
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            return None;
        }
        Some(self.emit())
    }

    pub fn update(&mut self, id: &str, field: ScaleField, value: &str) -> Option<String> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;

        match field {
            ScaleField::Nome => entry.nome = value.to_string(),
            ScaleField::Conteudo => entry.conteudo = value.to_string(),
        }

        Some(self.emit())
    }

    fn emit(&mut self) -> String {
        let out = self.serialized();
        self.last_seen.clone_from(&out);
        out
    }
}
