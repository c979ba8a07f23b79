//! Variable interpolation for command lines
//!
//! Replaces `${NAME}` with Mkfile variables, falling back to the environment.

use crate::error::{InterpolationError, InterpolationResult};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::env;
use std::sync::OnceLock;

/// Expansion rounds before a value is considered self-referential
const MAX_DEPTH: usize = 16;

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid pattern"))
}

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from the Mkfile
/// - Environment variables (when not found in the Mkfile)
///
/// Unknown references are left untouched so the shell can expand them.
pub fn interpolate(s: &str, vars: &IndexMap<String, String>) -> InterpolationResult<String> {
    let re = variable_pattern();
    let mut result = s.to_string();

    for _ in 0..MAX_DEPTH {
        let mut changed = false;

        let next = re.replace_all(&result, |caps: &Captures| {
            let name = &caps[1];
            if let Some(value) = vars.get(name) {
                changed = true;
                return value.clone();
            }
            if let Ok(value) = env::var(name) {
                changed = true;
                return value;
            }
            caps[0].to_string()
        });
        let next = next.into_owned();

        if !changed {
            return Ok(result);
        }
        result = next;
    }

    Err(InterpolationError::RecursiveInterpolation(s.to_string()))
}

/// Expand every variable against the others
///
/// Commands see the same value whether they read `${NAME}` or the
/// exported `$NAME`.
pub fn expand_variables(
    vars: &IndexMap<String, String>,
) -> InterpolationResult<IndexMap<String, String>> {
    vars.iter()
        .map(|(name, value)| Ok((name.clone(), interpolate(value, vars)?)))
        .collect()
}
