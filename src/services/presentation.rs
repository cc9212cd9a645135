use serde::Serialize;

use crate::model::entry::{RepertoireEntry, ScaleEntry};
use crate::model::report::RawReportFields;
use crate::parsers::{escalas, repertoire};
use crate::services::beautify::{beautify, format_scales};
use crate::services::reconcile::Reconciler;

/// Relatório pronto para a tela de leitura.
#[derive(Debug, Serialize, Clone)]
pub struct ReportView {
    pub observacao: String,
    pub escalas: String,
    pub repertorio: String,

    pub escalas_itens: Vec<ScaleEntry>,
    pub repertorio_itens: Vec<RepertoireEntry>,

    /// Campos vieram rotacionados e foram corrigidos
    pub remapped: bool,
}

pub fn present(raw: &RawReportFields, reconciler: &Reconciler) -> ReportView {
    let reconciled = reconciler.reconcile(raw);
    let fields = &reconciled.fields;

    let escalas_texto =
        format_scales(&fields.escalas).unwrap_or_else(|| beautify(&fields.escalas));

    ReportView {
        observacao: beautify(&fields.observacao),
        escalas: escalas_texto,
        repertorio: beautify(&fields.repertorio),
        escalas_itens: escalas::parse(&fields.escalas),
        repertorio_itens: repertoire::extract_repertoire(&fields.repertorio),
        remapped: reconciled.remapped,
    }
}
