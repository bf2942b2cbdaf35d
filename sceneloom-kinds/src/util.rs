//! Parameter extraction helpers shared by the built-in kinds.
//!
//! Every extractor falls back to a default instead of failing: saved
//! projects from older or newer editors must keep loading, so missing
//! or malformed fields are defaulted, never rejected.

use sceneloom_types::Params;

pub(crate) fn string_param(params: &Params, key: &str, default: &str) -> String {
    params
        .get_str(key)
        .map_or_else(|| default.to_owned(), str::to_owned)
}

pub(crate) fn f32_param(params: &Params, key: &str, default: f32) -> f32 {
    params.get_f64(key).map_or(default, |n| n as f32)
}

pub(crate) fn u32_param(params: &Params, key: &str, default: u32) -> u32 {
    params
        .get_u64(key)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

/// Reads a three-element numeric array. Anything else (missing key,
/// wrong length, non-numeric slots) leaves the default in place,
/// slot by slot.
pub(crate) fn vec3_param(params: &Params, key: &str, default: [f32; 3]) -> [f32; 3] {
    match params.get_array(key) {
        Some(values) if values.len() == 3 => {
            let mut out = default;
            for (slot, value) in out.iter_mut().zip(values) {
                if let Some(n) = value.as_f64() {
                    *slot = n as f32;
                }
            }
            out
        }
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vec3_defaults_on_wrong_shape() {
        let params = Params::new()
            .with("short", json!([1.0, 2.0]))
            .with("mixed", json!([1.0, "two", 3.0]));
        assert_eq!(vec3_param(&params, "missing", [9.0, 9.0, 9.0]), [9.0, 9.0, 9.0]);
        assert_eq!(vec3_param(&params, "short", [9.0, 9.0, 9.0]), [9.0, 9.0, 9.0]);
        assert_eq!(vec3_param(&params, "mixed", [9.0, 9.0, 9.0]), [1.0, 9.0, 3.0]);
    }

    #[test]
    fn scalars_default_on_wrong_type() {
        let params = Params::new().with("n", "not a number");
        assert_eq!(f32_param(&params, "n", 0.5), 0.5);
        assert_eq!(u32_param(&params, "n", 8), 8);
        assert_eq!(string_param(&params, "absent", "fallback"), "fallback");
    }
}
