use serde_json::{json, Value};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::model::entry::ScaleEntry;
use crate::model::report::RawReportFields;
use crate::parsers::{escalas, key_value, repertoire};
use crate::services::classifier::{self, Category};
use crate::services::reconcile::Reconciler;
use crate::services::{audit, beautify, presentation};

mod command;
pub use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn get_text(payload: &Value) -> &str {
    payload.get("text").and_then(|v| v.as_str()).unwrap_or("")
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_entries_from_payload(payload: &Value) -> Result<Vec<ScaleEntry>> {
    let arr = payload
        .get("entries")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CoreError::InvalidPayload("payload.entries must be an array".into()))?;

    let mut entries: Vec<ScaleEntry> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<ScaleEntry>(v) {
            Ok(e) => entries.push(e),
            Err(e) => {
                return Err(CoreError::InvalidPayload(format!(
                    "invalid entry at index {i}: {e}"
                )))
            }
        }
    }

    Ok(entries)
}

fn parse_fields_from_payload(payload: &Value) -> Result<RawReportFields> {
    if !payload.is_object() {
        return Err(CoreError::InvalidPayload("payload must be an object".into()));
    }
    Ok(serde_json::from_value(payload.clone())?)
}

fn classify_payload(text: &str) -> Value {
    let scores: Vec<Value> = Category::ALL
        .iter()
        .map(|&c| {
            json!({
                "category": c,
                "hits": classifier::score(text, c),
                "threshold": c.threshold(),
                "matched": classifier::matches(text, c),
                "probes": classifier::matched_probes(text, c),
            })
        })
        .collect();

    json!({ "guess": classifier::classify(text), "scores": scores })
}

pub fn handle(input: &str, cfg: &CoreConfig) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);
    let reconciler = Reconciler::from_config(cfg);

    match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "relatorio-core alive" })),

        Command::Beautify => ok(id, json!({ "text": beautify::beautify(get_text(payload)) })),

        Command::ParseScales => {
            let parsed = escalas::parse_with_strategy(get_text(payload));
            ok(id, json!({ "entries": parsed.entries, "strategy": parsed.strategy }))
        }

        Command::StringifyScales => match parse_entries_from_payload(payload) {
            Ok(entries) => ok(id, json!({ "text": escalas::stringify(&entries) })),
            Err(e) => err(id, e.to_string()),
        },

        Command::FormatScales => {
            let text = get_text(payload);
            let formatted =
                beautify::format_scales(text).unwrap_or_else(|| beautify::beautify(text));
            ok(id, json!({ "text": formatted }))
        }

        Command::ExtractRepertoire => {
            let entries = repertoire::extract_repertoire(get_text(payload));
            ok(id, json!({ "entries": entries }))
        }

        Command::ExtractKeyValues => {
            let entries = key_value::extract_key_values(get_text(payload));
            ok(id, json!({ "entries": entries }))
        }

        Command::Classify => ok(id, classify_payload(get_text(payload))),

        Command::Reconcile => match parse_fields_from_payload(payload) {
            Ok(fields) => ok(id, json!(reconciler.reconcile(&fields))),
            Err(e) => err(id, e.to_string()),
        },

        Command::Present => match parse_fields_from_payload(payload) {
            Ok(fields) => ok(id, json!(presentation::present(&fields, &reconciler))),
            Err(e) => err(id, e.to_string()),
        },

        Command::AuditExport => {
            let path_str = payload.get("path").and_then(|v| v.as_str()).unwrap_or("");
            if path_str.is_empty() {
                return err(id, "payload.path is required");
            }
            match audit::audit_file(std::path::Path::new(path_str), &reconciler) {
                Ok(report) => ok(id, json!(report)),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
