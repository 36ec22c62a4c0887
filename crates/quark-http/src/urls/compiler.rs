//! Convention-based compilation of procedure names into path patterns.
//!
//! A procedure name is split on `_`. Tokens starting with an upper-case
//! letter become literal segments (snake-cased); any other token is a path
//! variable and consumes the next declared scalar parameter kind.
//!
//! | Name | Kinds | Pattern |
//! |------|-------|---------|
//! | `Hello_World` | | `/hello/world` |
//! | `Vehicle_groupId_vin` | `[Integer, String]` | `/vehicle/{i}/{s}` |
//! | `JsonResponse` | | `/json_response` |
//!
//! The verb prefix (`GET_`, `POST_`, ...) is stripped by the caller before
//! compilation; see [`split_verb`](crate::procedure::split_verb).

use std::fmt;

use quark_core::NameFormatError;

use super::kind::ParamKind;

/// One typed variable embedded in a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSlot {
    /// Index of the path segment holding this variable.
    pub position: usize,
    /// The declared kind of the variable.
    pub kind: ParamKind,
    /// Tag-qualified, snake-cased name, e.g. `i.group_id`.
    pub name: String,
}

impl PatternSlot {
    /// Returns the variable name without its kind tag, e.g. `group_id`.
    pub fn var_name(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(_, name)| name)
    }
}

/// The result of compiling a procedure name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// The path pattern, e.g. `/vehicle/{i}/{s}`.
    pub path: String,
    /// The typed slots, in token order.
    pub slots: Vec<PatternSlot>,
}

impl CompiledPattern {
    /// Returns the segments of the pattern (without the leading `/`).
    pub fn segments(&self) -> Vec<&str> {
        pattern_segments(&self.path)
    }

    /// Returns the pattern with each wildcard replaced by `{var_name}`.
    ///
    /// This is the form consumed by API documentation generators:
    /// `/vehicle/{i}/{s}` becomes `/vehicle/{group_id}/{vin}`.
    pub fn doc_path(&self) -> String {
        let mut segments: Vec<String> = self.segments().into_iter().map(String::from).collect();
        for slot in &self.slots {
            if let Some(segment) = segments.get_mut(slot.position) {
                *segment = format!("{{{}}}", slot.var_name());
            }
        }
        format!("/{}", segments.join("/"))
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Splits a compiled pattern into its segments.
pub fn pattern_segments(pattern: &str) -> Vec<&str> {
    pattern.strip_prefix('/').unwrap_or(pattern).split('/').collect()
}

/// Compiles a procedure name into a path pattern and its typed slots.
///
/// `kinds` lists the declared scalar parameters in order; the receiver and a
/// trailing request-body parameter are excluded by the caller.
///
/// # Errors
///
/// Returns a [`NameFormatError`] when the name contains an empty token, or
/// when the number of variable tokens differs from `kinds.len()` in either
/// direction.
///
/// # Examples
///
/// ```
/// use quark_http::urls::compiler::compile;
/// use quark_http::urls::kind::ParamKind;
///
/// let pattern = compile("Vehicle_groupId_vin", &[ParamKind::Integer, ParamKind::String]).unwrap();
/// assert_eq!(pattern.path, "/vehicle/{i}/{s}");
/// assert_eq!(pattern.slots[0].name, "i.group_id");
/// assert_eq!(pattern.slots[1].position, 2);
/// ```
pub fn compile(name: &str, kinds: &[ParamKind]) -> Result<CompiledPattern, NameFormatError> {
    let mut path = String::new();
    let mut slots = Vec::new();
    let mut remaining = kinds.iter();

    for (position, token) in name.split('_').enumerate() {
        let Some(first) = token.chars().next() else {
            return Err(NameFormatError::new(
                name,
                format!("empty path token at position {position}"),
            ));
        };

        path.push('/');
        if first.is_uppercase() {
            path.push_str(&pascal_to_snake(token));
            continue;
        }

        let Some(&kind) = remaining.next() else {
            return Err(NameFormatError::new(
                name,
                format!(
                    "path variable '{token}' has no matching parameter ({} declared)",
                    kinds.len()
                ),
            ));
        };
        path.push_str(kind.wildcard());
        slots.push(PatternSlot {
            position,
            kind,
            name: format!("{}.{}", kind.tag(), pascal_to_snake(token)),
        });
    }

    if slots.len() != kinds.len() {
        return Err(NameFormatError::new(
            name,
            format!(
                "name has {} path variables but {} parameters are declared",
                slots.len(),
                kinds.len()
            ),
        ));
    }

    Ok(CompiledPattern { path, slots })
}

/// Converts `PascalCase` or `camelCase` to `snake_case`.
///
/// Every upper-case character starts a new word, so acronyms split per
/// letter: `ABC` becomes `a_b_c`.
pub fn pascal_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_to_snake() {
        assert_eq!(pascal_to_snake("ABCDEF"), "a_b_c_d_e_f");
        assert_eq!(pascal_to_snake("HelloWorld"), "hello_world");
        assert_eq!(pascal_to_snake("groupId"), "group_id");
        assert_eq!(pascal_to_snake("vin"), "vin");
    }

    #[test]
    fn test_compile_literals_only() {
        let pattern = compile("Test_Nameis_HelloWorld", &[]).unwrap();
        assert_eq!(pattern.path, "/test/nameis/hello_world");
        assert!(pattern.slots.is_empty());
        assert_eq!(pattern.doc_path(), "/test/nameis/hello_world");
    }

    #[test]
    fn test_compile_single_token() {
        let pattern = compile("JsonResponse", &[]).unwrap();
        assert_eq!(pattern.path, "/json_response");
    }

    #[test]
    fn test_compile_vehicle_group_vin() {
        let pattern =
            compile("Vehicle_groupId_vin", &[ParamKind::Integer, ParamKind::String]).unwrap();
        assert_eq!(pattern.path, "/vehicle/{i}/{s}");
        assert_eq!(
            pattern.slots,
            vec![
                PatternSlot {
                    position: 1,
                    kind: ParamKind::Integer,
                    name: "i.group_id".to_string(),
                },
                PatternSlot {
                    position: 2,
                    kind: ParamKind::String,
                    name: "s.vin".to_string(),
                },
            ]
        );
        assert_eq!(pattern.doc_path(), "/vehicle/{group_id}/{vin}");
        assert_eq!(pattern.segments(), vec!["vehicle", "{i}", "{s}"]);
    }

    #[test]
    fn test_compile_float_slot() {
        let pattern = compile("Price_amount", &[ParamKind::Float]).unwrap();
        assert_eq!(pattern.path, "/price/{f}");
        assert_eq!(pattern.slots[0].var_name(), "amount");
    }

    #[test]
    fn test_compile_leading_variable() {
        let pattern = compile("id_Detail", &[ParamKind::Integer]).unwrap();
        assert_eq!(pattern.path, "/{i}/detail");
        assert_eq!(pattern.slots[0].position, 0);
    }

    #[test]
    fn test_compile_too_few_parameters() {
        let err = compile("Vehicle_groupId_vin", &[ParamKind::Integer]).unwrap_err();
        assert_eq!(err.name, "Vehicle_groupId_vin");
        assert!(err.reason.contains("vin"));
    }

    #[test]
    fn test_compile_too_many_parameters() {
        let err = compile("Vehicle_vin", &[ParamKind::String, ParamKind::Integer]).unwrap_err();
        assert!(err.reason.contains("1 path variables but 2 parameters"));
    }

    #[test]
    fn test_compile_arity_property() {
        let name = "A_x_B_y_z";
        for n in 0..6 {
            let kinds = vec![ParamKind::String; n];
            let result = compile(name, &kinds);
            if n == 3 {
                let pattern = result.unwrap();
                assert_eq!(pattern.slots.len(), 3);
                let positions: Vec<usize> = pattern.slots.iter().map(|s| s.position).collect();
                assert_eq!(positions, vec![1, 3, 4]);
            } else {
                assert!(result.is_err(), "{n} kinds should fail");
            }
        }
    }

    #[test]
    fn test_compile_empty_tokens() {
        assert!(compile("", &[]).is_err());
        assert!(compile("A__B", &[]).is_err());
        assert!(compile("A_", &[]).is_err());
    }

    #[test]
    fn test_var_name_without_tag() {
        let slot = PatternSlot {
            position: 0,
            kind: ParamKind::String,
            name: "plain".to_string(),
        };
        assert_eq!(slot.var_name(), "plain");
    }
}
