#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Beautify,
    ParseScales,
    StringifyScales,
    FormatScales,
    ExtractRepertoire,
    ExtractKeyValues,
    Classify,
    Reconcile,
    Present,
    AuditExport,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "text.beautify" => Command::Beautify,
            "escalas.parse" => Command::ParseScales,
            "escalas.stringify" => Command::StringifyScales,
            "escalas.format" => Command::FormatScales,
            "repertorio.extract" => Command::ExtractRepertoire,
            "kv.extract" => Command::ExtractKeyValues,
            "content.classify" => Command::Classify,
            "report.reconcile" => Command::Reconcile,
            "report.present" => Command::Present,
            "export.audit" => Command::AuditExport,
            _ => Command::Unknown,
        }
    }
}
