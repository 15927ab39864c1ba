// lcstats-core/src/features.rs
//! Feature names and the `FeatureVector` container.
//!
//! Column order is a public contract: downstream classifiers index the row by
//! position, so the basic block always precedes the Fourier block and neither
//! is ever reordered.
//!
//! License: MIT OR APACHE 2.0

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Column names of the 22-value basic statistics block, in output order.
pub const BASIC_FEATURE_NAMES: [&str; 22] = [
    "N",
    "median",
    "wmean",
    "chi2red",
    "RoMS",
    "wstd",
    "NormPeaktoPeakamp",
    "NormExcessVar",
    "medianAbsDev",
    "iqr",
    "i60r",
    "i70r",
    "i80r",
    "i90r",
    "skew",
    "smallkurt",
    "invNeumann",
    "WelchI",
    "StetsonJ",
    "StetsonK",
    "AD",
    "SW",
];

/// Column names of the Fourier block for a given maximum order.
///
/// With `relative` set the harmonics are named as amplitude/phase pairs
/// (`f1_amp`, `f1_phi0`, then `f1_relampK`/`f1_relphiK` for harmonic K+1);
/// otherwise as raw coefficients `f1_A1`, `f1_B1`, ….
pub fn fourier_feature_names(max_nterms: usize, relative: bool) -> Vec<String> {
    let mut names: Vec<String> = ["f1_power", "f1_BIC", "f1_a", "f1_b"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for harmonic in 1..=max_nterms {
        if !relative {
            names.push(format!("f1_A{}", harmonic));
            names.push(format!("f1_B{}", harmonic));
        } else if harmonic == 1 {
            names.push("f1_amp".to_string());
            names.push("f1_phi0".to_string());
        } else {
            names.push(format!("f1_relamp{}", harmonic - 1));
            names.push(format!("f1_relphi{}", harmonic - 1));
        }
    }
    names
}

/// An ordered row of named feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Pairs names with values. Both must have the same length.
    pub(crate) fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a value by column name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.values[index])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[derive(serde::Serialize)]
struct NamedValue<'a> {
    name: &'a str,
    value: f64,
}

/// Serializes as a list of `{"name", "value"}` objects, preserving column order.
/// `serde_json` writes non-finite values as `null`.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (name, value) in self.iter() {
            seq.serialize_element(&NamedValue { name, value })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fourier_names() {
        let names = fourier_feature_names(5, true);
        assert_eq!(
            names,
            vec![
                "f1_power", "f1_BIC", "f1_a", "f1_b", "f1_amp", "f1_phi0", "f1_relamp1",
                "f1_relphi1", "f1_relamp2", "f1_relphi2", "f1_relamp3", "f1_relphi3",
                "f1_relamp4", "f1_relphi4",
            ]
        );
    }

    #[test]
    fn test_raw_fourier_names() {
        let names = fourier_feature_names(2, false);
        assert_eq!(
            names,
            vec!["f1_power", "f1_BIC", "f1_a", "f1_b", "f1_A1", "f1_B1", "f1_A2", "f1_B2"]
        );
    }

    #[test]
    fn test_get_and_json_with_nan() {
        let fv = FeatureVector::new(
            vec!["N".to_string(), "SW".to_string()],
            vec![3.0, f64::NAN],
        );
        assert_eq!(fv.get("N"), Some(3.0));
        assert!(fv.get("SW").unwrap().is_nan());
        assert_eq!(fv.get("missing"), None);

        let json = serde_json::to_string(&fv).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"N","value":3.0},{"name":"SW","value":null}]"#
        );
    }
}
