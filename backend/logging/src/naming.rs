//! Logger naming derived from a type's identity.
//!
//! Any type implementing [`HasLogger`] gets a `logger()` method returning the
//! logger named `<module-path>.<TypeName>` for its concrete type, unless it
//! declares an explicit name through [`HasLogger::logger_name_override`].

use std::any::type_name;
use std::sync::Arc;

use crate::logger::Logger;
use crate::registry::{get_logger, LoggerRegistry};

/// Resolve a logger name from a Rust type name and an optional override.
///
/// The override wins verbatim. Otherwise the type path is split at its last
/// `::` outside generic, tuple and array brackets and joined as `module.Type`.
/// Tuples, arrays and slices have no such separator and pass through unchanged.
///
/// ```
/// use logpp::resolve_logger_name;
///
/// assert_eq!(resolve_logger_name("app::net::Server", None), "app::net.Server");
/// assert_eq!(resolve_logger_name("app::net::Server", Some("custom_name")), "custom_name");
/// ```
pub fn resolve_logger_name(type_name: &str, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_string();
    }
    match split_type_path(type_name) {
        Some((module, ty)) => format!("{module}.{ty}"),
        None => type_name.to_string(),
    }
}

/// The derived logger name for `T`.
pub fn logger_name_of<T: ?Sized>() -> String {
    resolve_logger_name(type_name::<T>(), None)
}

fn split_type_path(path: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let mut split = None;
    let bytes = path.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => split = Some(i),
            _ => {}
        }
    }
    split.map(|i| (&path[..i], &path[i + 2..]))
}

/// Gives a type its own logger.
pub trait HasLogger {
    /// Use this name instead of the derived `module.Type` name.
    fn logger_name_override(&self) -> Option<&'static str> {
        None
    }

    fn logger_name(&self) -> String {
        resolve_logger_name(type_name::<Self>(), self.logger_name_override())
    }

    /// This type's logger from the global registry.
    fn logger(&self) -> Arc<Logger> {
        get_logger(&self.logger_name())
    }

    fn logger_in(&self, registry: &LoggerRegistry) -> Arc<Logger> {
        registry.get_logger(&self.logger_name())
    }
}

/// Implement [`HasLogger`] for a type, optionally with a fixed logger name.
///
/// ```
/// struct Uploader;
/// logpp::impl_has_logger!(Uploader, "uploads");
///
/// use logpp::HasLogger;
/// assert_eq!(Uploader.logger().name(), "uploads");
/// ```
#[macro_export]
macro_rules! impl_has_logger {
    ($ty:ty) => {
        impl $crate::HasLogger for $ty {}
    };
    ($ty:ty, $name:expr) => {
        impl $crate::HasLogger for $ty {
            fn logger_name_override(&self) -> ::std::option::Option<&'static str> {
                ::std::option::Option::Some($name)
            }
        }
    };
}
