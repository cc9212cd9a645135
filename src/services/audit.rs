//! Passada em lote do reconciliador sobre uma exportação de relatórios.
//!
//! Só lê: serve para medir quantos registros antigos casam com a assinatura
//! de rotação antes de decidir aplicá-la em produção.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{CoreError, Result};
use crate::model::report::RawReportFields;
use crate::services::encoding;
use crate::services::reconcile::{Reconciler, RotationSignals};

#[derive(Debug, Deserialize)]
struct ExportedRecord {
    #[serde(default)]
    id: Option<Value>,

    #[serde(flatten)]
    fields: RawReportFields,
}

#[derive(Debug, Serialize)]
pub struct AuditItem {
    pub index: usize,
    pub id: Option<Value>,
    pub signals: RotationSignals,
    pub remapped: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditReport {
    pub encoding: Option<String>,
    pub total: usize,
    /// Assinatura completa (3 de 3)
    pub rotated: usize,
    /// 1 ou 2 sondas: não remapeados, mas vale revisar
    pub partial: usize,
    pub items: Vec<AuditItem>,
}

pub fn audit_file(path: &Path, reconciler: &Reconciler) -> Result<AuditReport> {
    let decoded = encoding::decode_file(path)?;
    if decoded.had_errors {
        return Err(CoreError::Decode(format!(
            "{} is not valid {}",
            path.display(),
            decoded.encoding
        )));
    }

    let mut report = audit_json(&decoded.text, reconciler)?;
    report.encoding = Some(decoded.encoding);
    Ok(report)
}

/// Aceita um array de relatórios ou `{ "data": [...] }`.
pub fn audit_json(text: &str, reconciler: &Reconciler) -> Result<AuditReport> {
    let value: Value = serde_json::from_str(text)?;

    let records = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CoreError::InvalidPayload(
                    "expected an array of reports or {\"data\": [...]}".into(),
                ))
            }
        },
        _ => {
            return Err(CoreError::InvalidPayload(
                "expected an array of reports".into(),
            ))
        }
    };

    let mut report = AuditReport {
        encoding: None,
        total: records.len(),
        rotated: 0,
        partial: 0,
        items: Vec::new(),
    };

    for (index, v) in records.into_iter().enumerate() {
        let record: ExportedRecord = serde_json::from_value(v).map_err(|e| {
            CoreError::InvalidPayload(format!("invalid report at index {index}: {e}"))
        })?;

        let out = reconciler.reconcile(&record.fields);

        match out.signals.count() {
            0 => continue,
            3 => report.rotated += 1,
            _ => report.partial += 1,
        }

        report.items.push(AuditItem {
            index,
            id: record.id,
            signals: out.signals,
            remapped: out.remapped,
        });
    }

    info!(
        total = report.total,
        rotated = report.rotated,
        partial = report.partial,
        "export audit finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = r#"[
        {"id": 1, "observacao": "Demonstrou boa evolução", "escalas": "ESCALA:Dó Maior|ok", "repertorio": "\"Minueto\": ok"},
        {"id": 2, "observacao": "Escala de Ré maior, arpejo", "escalas": "1. \"Gavotte\" tocada", "repertorio": "Teve ótimo desempenho"},
        {"id": 3, "observacao": "Escala de Ré maior, arpejo", "escalas": "nada", "repertorio": "Teve ótimo desempenho"},
        {"id": 4, "observacao": null, "escalas": null, "repertorio": null}
    ]"#;

    #[test]
    fn counts_rotated_and_partial_records() {
        let report = audit_json(EXPORT, &Reconciler::default()).unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.rotated, 1);
        assert_eq!(report.partial, 1);

        let rotated: Vec<_> = report.items.iter().filter(|i| i.remapped).collect();
        assert_eq!(rotated.len(), 1);
        assert_eq!(rotated[0].index, 1);
        assert_eq!(rotated[0].id, Some(Value::from(2)));
    }

    #[test]
    fn accepts_data_envelope() {
        let text = format!(r#"{{"data": {EXPORT}}}"#);
        let report = audit_json(&text, &Reconciler::new(false)).unwrap();

        assert_eq!(report.rotated, 1);
        assert!(report.items.iter().all(|i| !i.remapped));
    }

    #[test]
    fn rejects_non_list_exports() {
        let err = audit_json(r#""texto""#, &Reconciler::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPayload(_)));

        let err = audit_json("{", &Reconciler::default()).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn audits_windows_1252_file() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(EXPORT);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let report = audit_file(file.path(), &Reconciler::default()).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.rotated, 1);
        assert!(report.encoding.is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = audit_file(Path::new("/nao/existe.json"), &Reconciler::default()).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
