pub mod audit;
pub mod beautify;
pub mod classifier;
pub mod editor;
pub mod encoding;
pub mod presentation;
pub mod reconcile;
