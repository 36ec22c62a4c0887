//! A named group of compiled procedures.
//!
//! A [`Service`] owns the procedures registered under one name together with
//! the [`RouteTable`] indexing them. Services are built in one go and never
//! mutated afterwards; see [`Quark`](crate::registry::Quark) for how they are
//! published.

use http::Method;
use quark_core::{QuarkError, QuarkResult};

use crate::procedure::{CompiledProcedure, Procedure};
use crate::urls::table::{verb_key, RouteTable};

/// An immutable service: name, procedures, and their route table.
#[derive(Debug, Clone)]
pub struct Service {
    name: String,
    procedures: Vec<CompiledProcedure>,
    table: RouteTable,
}

impl Service {
    /// Compiles `procedures` and indexes them under `name`.
    ///
    /// Two procedures compiling to the same pattern and verb are ambiguous:
    /// the later one wins with a warning, or, when `strict` is set,
    /// registration fails.
    ///
    /// # Errors
    ///
    /// - [`QuarkError::InvalidService`] if `name` is empty.
    /// - [`QuarkError::NameFormat`] for the first procedure whose name does not
    ///   compile; the whole service is rejected.
    /// - [`QuarkError::AmbiguousRoute`] on a duplicate route in strict mode.
    pub fn build(name: &str, procedures: Vec<Procedure>, strict: bool) -> QuarkResult<Self> {
        if name.is_empty() {
            return Err(QuarkError::InvalidService("service name must not be empty".to_string()));
        }

        let mut compiled = Vec::with_capacity(procedures.len());
        let mut table = RouteTable::new();

        for procedure in procedures {
            let procedure = procedure.compile().map_err(|e| {
                tracing::error!(service = name, error = %e, "Procedure rejected");
                QuarkError::from(e)
            })?;
            let index = compiled.len();

            if let Some(previous) = table.register(procedure.path(), procedure.verb(), index) {
                let verb = verb_key(procedure.verb());
                if strict {
                    return Err(QuarkError::AmbiguousRoute {
                        path: procedure.path().to_string(),
                        verb: verb.trim_start_matches(':').to_string(),
                    });
                }
                tracing::warn!(
                    service = name,
                    path = procedure.path(),
                    verb = %verb,
                    replaced = compiled
                        .get(previous)
                        .map_or("", |p: &CompiledProcedure| p.name()),
                    by = procedure.name(),
                    "Ambiguous route overwritten"
                );
            }

            tracing::debug!(
                service = name,
                procedure = procedure.name(),
                path = procedure.path(),
                verb = procedure.verb().map_or("*", Method::as_str),
                "Registered route"
            );
            compiled.push(procedure);
        }

        Ok(Self {
            name: name.to_string(),
            procedures: compiled,
            table,
        })
    }

    /// Returns the service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every compiled procedure, in registration order.
    pub fn procedures(&self) -> &[CompiledProcedure] {
        &self.procedures
    }

    /// Returns the procedure at `index`.
    pub fn procedure(&self, index: usize) -> Option<&CompiledProcedure> {
        self.procedures.get(index)
    }

    /// Returns the route table.
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Dispatches `segments` and `verb` to a procedure index.
    pub fn route<S: AsRef<str>>(&self, segments: &[S], verb: &Method) -> Option<usize> {
        self.table.route(segments, verb)
    }

    /// Lists every route leaf as `("vehicle/{i}/:GET", index)`, sorted.
    pub fn dump_paths(&self) -> Vec<(String, usize)> {
        self.table.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::response::HttpResponse;
    use crate::urls::kind::ParamKind;

    fn noop(name: &str) -> Procedure {
        Procedure::new(name, |_console: Console| async { Ok(HttpResponse::empty()) })
    }

    fn vehicle_service(strict: bool) -> QuarkResult<Service> {
        Service::build(
            "root",
            vec![
                noop("Vehicle_Vin"),
                noop("Vehicle_vins").param(ParamKind::String),
                noop("GET_Vehicle_groupId_vin").params(&[ParamKind::Integer, ParamKind::String]),
                noop("PATCH_Vehicle_groupId_vin").params(&[ParamKind::Integer, ParamKind::String]),
                noop("Hello_World"),
            ],
            strict,
        )
    }

    #[test]
    fn test_build_and_route() {
        let service = vehicle_service(true).unwrap();
        assert_eq!(service.name(), "root");
        assert_eq!(service.procedures().len(), 5);

        assert_eq!(service.route(&["vehicle", "vin"], &Method::GET), Some(0));
        assert_eq!(service.route(&["vehicle", "WVW1"], &Method::GET), Some(1));
        assert_eq!(service.route(&["vehicle", "3", "WVW1"], &Method::GET), Some(2));
        assert_eq!(service.route(&["vehicle", "3", "WVW1"], &Method::PATCH), Some(3));
        assert_eq!(service.route(&["vehicle", "3", "WVW1"], &Method::DELETE), None);
        assert_eq!(service.route(&["hello", "world"], &Method::PUT), Some(4));
        assert_eq!(
            service.procedure(2).map(CompiledProcedure::name),
            Some("GET_Vehicle_groupId_vin")
        );
    }

    #[test]
    fn test_dump_paths() {
        let service = vehicle_service(false).unwrap();
        let paths: Vec<String> = service.dump_paths().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "hello/world/:",
                "vehicle/vin/:",
                "vehicle/{i}/{s}/:GET",
                "vehicle/{i}/{s}/:PATCH",
                "vehicle/{s}/:",
            ]
        );
    }

    #[test]
    fn test_name_format_rejects_service() {
        let err = Service::build("root", vec![noop("Hello_World"), noop("Vehicle_vin")], false).unwrap_err();
        assert!(matches!(err, QuarkError::NameFormat(ref e) if e.name == "Vehicle_vin"));
    }

    #[test]
    fn test_ambiguous_last_write_wins() {
        let service = Service::build(
            "root",
            vec![
                noop("Vehicle_id").param(ParamKind::Integer),
                noop("Vehicle_num").param(ParamKind::Integer),
            ],
            false,
        )
        .unwrap();
        assert_eq!(service.route(&["vehicle", "1"], &Method::GET), Some(1));
    }

    #[test]
    fn test_ambiguous_strict_fails() {
        let err = Service::build(
            "root",
            vec![noop("GET_Users"), noop("GET_Users")],
            true,
        )
        .unwrap_err();
        match err {
            QuarkError::AmbiguousRoute { path, verb } => {
                assert_eq!(path, "/users");
                assert_eq!(verb, "GET");
            }
            other => panic!("expected ambiguous route, got {other:?}"),
        }
    }

    #[test]
    fn test_different_verbs_are_not_ambiguous() {
        assert!(Service::build("root", vec![noop("GET_Users"), noop("POST_Users"), noop("Users")], true).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Service::build("", Vec::new(), false),
            Err(QuarkError::InvalidService(_))
        ));
    }
}
