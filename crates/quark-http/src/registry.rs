//! Service registry.
//!
//! A [`Registry`] is an immutable snapshot of every registered service. It
//! selects a service from the first path segment and falls back to the root
//! service for everything else.
//!
//! [`Quark`] is the process-wide handle. Registration takes a lock, builds a
//! new snapshot off to the side, and publishes it with one atomic store;
//! request handling only ever loads the current snapshot and never blocks on
//! registration. A request that loaded a snapshot keeps using it to the end,
//! so it sees either all or none of a concurrent registration.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use http::Method;

use quark_core::{QuarkResult, Settings};

use crate::binder::{bind, PathArgs};
use crate::codec::{Codec, JsonCodec, PrettyJsonCodec};
use crate::console::Console;
use crate::procedure::{CompiledProcedure, Procedure};
use crate::request::QuarkRequest;
use crate::service::Service;

/// The outcome of a successful dispatch.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// The service that matched.
    pub service: Arc<Service>,
    /// Index of the procedure within the service.
    pub index: usize,
    /// The segments the procedure's pattern was matched against.
    pub segments: Vec<String>,
}

impl Dispatch {
    /// Returns the matched procedure.
    pub fn procedure(&self) -> Option<&CompiledProcedure> {
        self.service.procedure(self.index)
    }

    /// Binds the path arguments of the matched procedure.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::BadRequest`](quark_core::QuarkError::BadRequest)
    /// if a segment does not parse as its slot's kind.
    pub fn bind(&self) -> QuarkResult<PathArgs> {
        self.procedure()
            .map_or_else(|| Ok(PathArgs::default()), |p| bind(p.slots(), self.segments.as_slice()))
    }
}

/// An immutable snapshot of the registered services.
#[derive(Debug, Clone)]
pub struct Registry {
    services: BTreeMap<String, Arc<Service>>,
    root_service: String,
    prefix: Vec<String>,
    generation: u64,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// `prefix` segments must lead every request path and are stripped before
    /// service selection.
    pub fn new(root_service: impl Into<String>, prefix: Vec<String>) -> Self {
        Self {
            services: BTreeMap::new(),
            root_service: root_service.into(),
            prefix,
            generation: 0,
        }
    }

    /// Returns a copy of this registry with `service` added, replacing any
    /// service of the same name.
    #[must_use]
    pub fn with_service(&self, service: Service) -> Self {
        let mut next = self.clone();
        next.services
            .insert(service.name().to_string(), Arc::new(service));
        next.generation += 1;
        next
    }

    /// Returns the service registered as `name`.
    pub fn service(&self, name: &str) -> Option<&Arc<Service>> {
        self.services.get(name)
    }

    /// Iterates the services in name order.
    pub fn services(&self) -> impl Iterator<Item = &Arc<Service>> {
        self.services.values()
    }

    /// Returns the name of the fallback service.
    pub fn root_service(&self) -> &str {
        &self.root_service
    }

    /// Returns how many registrations produced this snapshot.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolves a request path to a procedure.
    ///
    /// 1. The configured prefix is stripped; a path without it never matches.
    /// 2. If the first segment names a service, the rest is dispatched there.
    /// 3. Otherwise, or if that misses, the whole path is dispatched against
    ///    the root service.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::Method;
    /// use quark_http::{Console, HttpResponse, Procedure, Registry, Service};
    ///
    /// let noop = |name: &str| Procedure::new(name, |_c: Console| async { Ok(HttpResponse::empty()) });
    /// let registry = Registry::new("root", Vec::new())
    ///     .with_service(Service::build("root", vec![noop("Hello_World")], false).unwrap())
    ///     .with_service(Service::build("admin", vec![noop("Users")], false).unwrap());
    ///
    /// let hit = registry.dispatch(&["admin", "users"], &Method::GET).unwrap();
    /// assert_eq!(hit.service.name(), "admin");
    /// assert_eq!(hit.segments, vec!["users"]);
    ///
    /// let hit = registry.dispatch(&["hello", "world"], &Method::GET).unwrap();
    /// assert_eq!(hit.service.name(), "root");
    /// assert!(registry.dispatch(&["nothing"], &Method::GET).is_none());
    /// ```
    pub fn dispatch<S: AsRef<str>>(&self, segments: &[S], verb: &Method) -> Option<Dispatch> {
        let segments = self.strip_prefix(segments)?;

        if let Some((head, rest)) = segments.split_first() {
            if let Some(service) = self.services.get(head.as_ref()) {
                if let Some(index) = service.route(rest, verb) {
                    return Some(Dispatch {
                        service: Arc::clone(service),
                        index,
                        segments: to_owned(rest),
                    });
                }
            }
        }

        let root = self.services.get(&self.root_service)?;
        root.route(segments, verb).map(|index| Dispatch {
            service: Arc::clone(root),
            index,
            segments: to_owned(segments),
        })
    }

    fn strip_prefix<'a, S: AsRef<str>>(&self, segments: &'a [S]) -> Option<&'a [S]> {
        if segments.len() < self.prefix.len() {
            return None;
        }
        let (head, rest) = segments.split_at(self.prefix.len());
        head.iter()
            .zip(&self.prefix)
            .all(|(s, p)| s.as_ref() == p.as_str())
            .then_some(rest)
    }
}

fn to_owned<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    segments.iter().map(|s| s.as_ref().to_string()).collect()
}

/// The process-wide registry handle.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use quark_core::Settings;
/// use quark_http::{Console, HttpResponse, Procedure, Quark};
///
/// let quark = Quark::new(&Settings::default());
/// quark
///     .register_service("root", vec![
///         Procedure::new("Hello_World", |_c: Console| async { Ok(HttpResponse::ok("hi")) }),
///     ])
///     .unwrap();
///
/// let snapshot = quark.snapshot();
/// assert!(snapshot.dispatch(&["hello", "world"], &Method::GET).is_some());
/// ```
pub struct Quark {
    current: ArcSwap<Registry>,
    lock: Mutex<()>,
    codec: Arc<dyn Codec>,
    strict: bool,
}

impl Quark {
    /// Creates an empty handle configured from `settings`.
    pub fn new(settings: &Settings) -> Self {
        let codec: Arc<dyn Codec> = if settings.pretty_json {
            Arc::new(PrettyJsonCodec)
        } else {
            Arc::new(JsonCodec)
        };
        Self {
            current: ArcSwap::from_pointee(Registry::new(
                settings.root_service.clone(),
                settings.prefix_segments(),
            )),
            lock: Mutex::new(()),
            codec,
            strict: settings.strict_routes,
        }
    }

    /// Replaces the codec used for every console.
    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    /// Compiles `procedures` into a service named `name` and publishes it.
    ///
    /// A service with the same name is replaced. On error nothing is
    /// published.
    ///
    /// # Errors
    ///
    /// See [`Service::build`].
    pub fn register_service(&self, name: &str, procedures: Vec<Procedure>) -> QuarkResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let service = Service::build(name, procedures, self.strict)?;
        let count = service.procedures().len();
        let next = self.current.load().with_service(service);
        tracing::info!(
            service = name,
            procedures = count,
            generation = next.generation(),
            "Service registered"
        );
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// Returns the codec.
    pub fn codec(&self) -> Arc<dyn Codec> {
        Arc::clone(&self.codec)
    }

    /// Creates the console for one invocation.
    pub fn console(&self, request: QuarkRequest, args: PathArgs) -> Console {
        Console::new(request, args, self.codec())
    }
}

impl Default for Quark {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl std::fmt::Debug for Quark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("Quark")
            .field("services", &snapshot.services.keys().collect::<Vec<_>>())
            .field("generation", &snapshot.generation)
            .field("codec", &self.codec)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}
