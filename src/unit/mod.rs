//! Unit naming rules

pub mod name;

pub use name::{
    classify, instance_of, is_instance, is_template, is_valid, template_of, unit_type,
    UnitNameKind, UnitType,
};
