pub mod escalas;
pub mod key_value;
pub mod repertoire;
