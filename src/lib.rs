//! Motor de reconciliação e mini-formato dos relatórios de aula.
//!
//! Lê os três campos livres de um relatório (observação, escalas,
//! repertório), corrige campos gravados trocados e converte a lista de
//! escalas de/para o formato `ESCALA:nome|conteudo;...`.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod protocol;
pub mod services;
