pub mod resolution;
pub mod tags;
pub mod template;
pub mod values;
