//! Bundle up parameters and their values in a generic way.
//!
//! A scene description hands texture parameters over as a
//! **ParamSet**; the MIP map reads its configuration from one (see
//! `MipMapParams::from_param_set`).

// std
use std::cell::Cell;
// others
use tracing::warn;
// pbrt
use crate::core::pbrt::Float;

// see paramset.h

#[derive(Debug, Clone)]
pub struct ParamSetItem<T> {
    pub name: String,
    pub values: Vec<T>,
    pub n_values: usize,
    pub looked_up: Cell<bool>,
}

impl<T> ParamSetItem<T> {
    pub fn new(name: String, values: Vec<T>) -> Self {
        let n_values: usize = values.len();
        ParamSetItem {
            name,
            values,
            n_values,
            looked_up: Cell::new(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    pub bools: Vec<ParamSetItem<bool>>,
    pub floats: Vec<ParamSetItem<Float>>,
    pub strings: Vec<ParamSetItem<String>>,
}

impl ParamSet {
    pub fn add_bool(&mut self, name: String, value: bool) {
        erase(&mut self.bools, &name);
        self.bools.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_float(&mut self, name: String, value: Float) {
        erase(&mut self.floats, &name);
        self.floats.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_floats(&mut self, name: String, values: Vec<Float>) {
        erase(&mut self.floats, &name);
        self.floats.push(ParamSetItem::new(name, values));
    }
    pub fn add_string(&mut self, name: String, value: String) {
        erase(&mut self.strings, &name);
        self.strings.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn find_one_bool(&self, name: &str, d: bool) -> bool {
        lookup_one(&self.bools, name, d)
    }
    pub fn find_one_float(&self, name: &str, d: Float) -> Float {
        lookup_one(&self.floats, name, d)
    }
    pub fn find_one_string(&self, name: &str, d: String) -> String {
        lookup_one(&self.strings, name, d)
    }
    /// Names of all parameters nobody asked for; each one is also
    /// reported as a warning.
    pub fn report_unused(&self) -> Vec<String> {
        let mut unused: Vec<String> = Vec::new();
        collect_unused(&self.bools, "bool", &mut unused);
        collect_unused(&self.floats, "float", &mut unused);
        collect_unused(&self.strings, "string", &mut unused);
        unused
    }
}

fn erase<T>(vec: &mut Vec<ParamSetItem<T>>, name: &str) {
    vec.retain(|v| v.name != name);
}

fn collect_unused<T>(vec: &[ParamSetItem<T>], type_name: &str, unused: &mut Vec<String>) {
    for v in vec {
        if !v.looked_up.get() {
            warn!("\"{} {}\" unused", type_name, v.name);
            unused.push(v.name.clone());
        }
    }
}

pub fn lookup_one<T>(vec: &[ParamSetItem<T>], name: &str, d: T) -> T
where
    T: Clone,
{
    for v in vec {
        if v.name == name && v.n_values == 1_usize {
            v.looked_up.set(true);
            return v.values[0].clone();
        }
    }
    d
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_one_falls_back_to_default() {
        let mut ps = ParamSet::default();
        ps.add_float(String::from("maxanisotropy"), 16.0);
        assert_eq!(ps.find_one_float("maxanisotropy", 8.0), 16.0);
        assert_eq!(ps.find_one_float("scale", 1.0), 1.0);
        assert_eq!(ps.find_one_bool("trilinear", false), false);
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let mut ps = ParamSet::default();
        ps.add_string(String::from("wrap"), String::from("clamp"));
        ps.add_string(String::from("wrap"), String::from("black"));
        assert_eq!(ps.strings.len(), 1);
        assert_eq!(ps.find_one_string("wrap", String::from("repeat")), "black");
    }

    #[test]
    fn arrays_are_not_single_values() {
        let mut ps = ParamSet::default();
        ps.add_floats(String::from("maxanisotropy"), vec![1.0, 2.0]);
        assert_eq!(ps.find_one_float("maxanisotropy", 8.0), 8.0);
        assert_eq!(ps.floats[0].n_values, 2);
    }

    #[test]
    fn unused_parameters_are_reported() {
        let mut ps = ParamSet::default();
        ps.add_bool(String::from("trilinear"), true);
        ps.add_float(String::from("scale"), 3.0);
        assert!(ps.find_one_bool("trilinear", false));
        assert_eq!(ps.report_unused(), vec![String::from("scale")]);
    }
}
