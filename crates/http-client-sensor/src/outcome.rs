/// Error value raised by an intercepted call, reduced to its simple type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrownValue {
    type_name: String,
}

impl ThrownValue {
    /// Captures the simple type name of `value`, without module path or generics.
    #[must_use]
    pub fn of<E: ?Sized>(_value: &E) -> Self {
        Self::named(simple_type_name(std::any::type_name::<E>()))
    }

    #[must_use]
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Smart pointers that are looked through to the value they hold
const WRAPPERS: [&str; 3] = ["Box", "Arc", "Rc"];

fn simple_type_name(full: &str) -> &str {
    let mut name = full.trim();
    loop {
        name = strip_reference(name);

        let (path, generics) = match name.find('<') {
            Some(open) => (&name[..open], name[open + 1..].strip_suffix('>')),
            None => (name, None),
        };
        // Trait objects keep their principal trait, not the marker bounds
        let principal = path.split(" + ").next().unwrap_or(path).trim();
        let last = principal.rsplit("::").next().unwrap_or(principal);

        match generics {
            Some(inner) if principal == path.trim() && WRAPPERS.contains(&last) => {
                name = inner.trim();
            }
            _ => return last,
        }
    }
}

fn strip_reference(mut name: &str) -> &str {
    loop {
        let stripped = name
            .trim_start_matches('&')
            .trim_start_matches("mut ")
            .trim_start_matches("dyn ")
            .trim_start();
        if stripped.len() == name.len() {
            return stripped;
        }
        name = stripped;
    }
}

/// How the intercepted call finished. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    succeeded: bool,
    thrown: Option<ThrownValue>,
}

impl CallOutcome {
    #[must_use]
    pub fn success() -> Self {
        Self {
            succeeded: true,
            thrown: None,
        }
    }

    #[must_use]
    pub fn failure<E: ?Sized>(error: &E) -> Self {
        Self::thrown(ThrownValue::of(error))
    }

    #[must_use]
    pub fn thrown(thrown: ThrownValue) -> Self {
        Self {
            succeeded: false,
            thrown: Some(thrown),
        }
    }

    #[must_use]
    pub fn from_result<T, E>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(error) => Self::failure(error),
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    #[must_use]
    pub fn thrown_value(&self) -> Option<&ThrownValue> {
        self.thrown.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConnectionError;
    use std::error::Error;
    use std::fmt;
    use std::sync::Arc;

    struct NullPointerException;

    #[derive(Debug)]
    struct TimeoutError;

    impl fmt::Display for TimeoutError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timed out")
        }
    }

    impl Error for TimeoutError {}

    #[test]
    fn test_simple_type_name() {
        assert_eq!(
            ThrownValue::of(&NullPointerException).type_name(),
            "NullPointerException"
        );
        assert_eq!(
            ThrownValue::of(&ConnectionError::NotConnected).type_name(),
            "ConnectionError"
        );
        assert_eq!(simple_type_name("alloc::vec::Vec<u8>"), "Vec");
    }

    #[test]
    fn test_boxed_error_type_name() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(TimeoutError);

        assert_eq!(ThrownValue::of(&boxed).type_name(), "Error");
        assert_eq!(ThrownValue::of(&*boxed).type_name(), "Error");

        let result: Result<(), Box<dyn Error + Send + Sync>> = Err(boxed);
        assert_eq!(
            CallOutcome::from_result(&result)
                .thrown_value()
                .map(ThrownValue::type_name),
            Some("Error")
        );
    }

    #[test]
    fn test_wrapped_error_type_name() {
        let shared = Arc::new(ConnectionError::NotConnected);
        assert_eq!(ThrownValue::of(&shared).type_name(), "ConnectionError");

        let boxed: Box<TimeoutError> = Box::new(TimeoutError);
        assert_eq!(ThrownValue::of(&boxed).type_name(), "TimeoutError");

        assert_eq!(
            simple_type_name("&mut dyn core::error::Error + core::marker::Send"),
            "Error"
        );
        assert_eq!(
            simple_type_name("alloc::rc::Rc<alloc::boxed::Box<dyn my::Failure<u8> + Send>>"),
            "Failure"
        );
    }

    #[test]
    fn test_from_result() {
        let ok: Result<(), std::io::Error> = Ok(());
        assert!(CallOutcome::from_result(&ok).succeeded());

        let err: Result<(), std::io::Error> = Err(std::io::Error::other("reset"));
        let outcome = CallOutcome::from_result(&err);
        assert!(!outcome.succeeded());
        assert_eq!(
            outcome.thrown_value().map(ThrownValue::type_name),
            Some("Error")
        );
    }
}
