use serde::Serialize;
use tracing::debug;

use crate::config::CoreConfig;
use crate::model::report::RawReportFields;
use crate::services::classifier::{self, Category};

/// Resultado das três sondas da assinatura de rotação.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationSignals {
    pub observacao_is_scale: bool,
    pub escalas_is_repertoire: bool,
    pub repertorio_is_observation: bool,
}

impl RotationSignals {
    /// Só as três juntas caracterizam a rotação.
    pub fn is_rotated(&self) -> bool {
        self.observacao_is_scale && self.escalas_is_repertoire && self.repertorio_is_observation
    }

    pub fn count(&self) -> usize {
        [
            self.observacao_is_scale,
            self.escalas_is_repertoire,
            self.repertorio_is_observation,
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub fields: RawReportFields,
    pub remapped: bool,
    pub signals: RotationSignals,
}

pub fn detect_rotation(raw: &RawReportFields) -> RotationSignals {
    RotationSignals {
        observacao_is_scale: classifier::matches(&raw.observacao, Category::Scale),
        escalas_is_repertoire: classifier::matches(&raw.escalas, Category::Repertoire),
        repertorio_is_observation: classifier::matches(&raw.repertorio, Category::Observation),
    }
}

/// Desfaz a rotação: observação real estava em `repertorio`, repertório
/// real em `escalas`, escalas reais em `observacao`.
pub fn unrotate(raw: &RawReportFields) -> RawReportFields {
    RawReportFields {
        observacao: raw.repertorio.clone(),
        escalas: raw.observacao.clone(),
        repertorio: raw.escalas.clone(),
    }
}

pub fn reconcile(raw: &RawReportFields) -> Reconciliation {
    Reconciler::default().reconcile(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    apply_rotation: bool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Reconciler {
            apply_rotation: true,
        }
    }
}

impl Reconciler {
    pub fn new(apply_rotation: bool) -> Self {
        Reconciler { apply_rotation }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Reconciler::new(cfg.apply_rotation)
    }

    pub fn reconcile(&self, raw: &RawReportFields) -> Reconciliation {
        let signals = detect_rotation(raw);

        if signals.is_rotated() && self.apply_rotation {
            debug!("rotated report fields detected, remapping");
            return Reconciliation {
                fields: unrotate(raw),
                remapped: true,
                signals,
            };
        }

        if signals.is_rotated() {
            debug!("rotated report fields detected, rotation disabled");
        }

        Reconciliation {
            fields: raw.clone(),
            remapped: false,
            signals,
        }
    }
}
