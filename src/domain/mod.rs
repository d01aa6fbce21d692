//! Domain layer - entities, value objects, and derived-value arithmetic

pub mod entities;
pub mod modifiers;
pub mod sheet;
pub mod value_objects;
