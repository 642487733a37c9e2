//! Sensor facade invoked by the interceptor around calls on a connection.

use tracing::{instrument, trace};

use crate::adapter::{
    ClientRequestAdapter, HttpRequestAdapter, HttpResponseAdapter, ResponseAdapter,
};
use crate::config::{MethodInfo, SensorConfig, SensorOptions};
use crate::connection::{HttpConnection, InterceptedTarget};
use crate::outcome::CallOutcome;

/// Why a sensor declined to produce an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// The target does not expose an HTTP connection
    UnsupportedTarget,
    /// The intercepted method is not the response-consuming one
    NotResponseMethod,
}

/// Result of asking a sensor for an adapter. Declining is not an error.
#[must_use]
#[derive(Debug)]
pub enum Applicability<T> {
    Applicable(T),
    NotApplicable(NotApplicableReason),
}

impl<T> Applicability<T> {
    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::Applicable(_))
    }

    pub fn reason(&self) -> Option<NotApplicableReason> {
        match self {
            Applicability::Applicable(_) => None,
            Applicability::NotApplicable(reason) => Some(*reason),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Applicability::Applicable(adapter) => Some(adapter),
            Applicability::NotApplicable(_) => None,
        }
    }
}

/// Entry point an interceptor uses for client-side calls.
///
/// Adapters borrow the target for the duration of one call and must not be kept
/// beyond it.
pub trait ClientSensor {
    type RequestAdapter<'a>: ClientRequestAdapter
    where
        Self: 'a;

    type ResponseAdapter<'a>: ResponseAdapter
    where
        Self: 'a;

    /// Called before the intercepted call runs.
    fn client_request_adapter<'a>(
        &'a self,
        target: &'a mut dyn InterceptedTarget,
        method_info: &MethodInfo,
        config: &dyn SensorConfig,
    ) -> Applicability<Self::RequestAdapter<'a>>;

    /// Called after the intercepted call returned or failed.
    fn client_response_adapter<'a>(
        &'a self,
        target: &'a mut dyn InterceptedTarget,
        method_info: &MethodInfo,
        outcome: &'a CallOutcome,
        exception_occurred: bool,
        config: &dyn SensorConfig,
    ) -> Applicability<Self::ResponseAdapter<'a>>;
}

/// Sensor for outgoing HTTP connections.
///
/// Response tags are produced only when the intercepted method is
/// [`SensorOptions::response_method`], so status and errors are reported once per
/// call even when several methods of the connection are intercepted.
#[derive(Debug, Clone, Default)]
pub struct HttpClientSensor {
    options: SensorOptions,
}

impl HttpClientSensor {
    pub fn new(options: SensorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SensorOptions {
        &self.options
    }
}

impl ClientSensor for HttpClientSensor {
    type RequestAdapter<'a> = HttpRequestAdapter<'a>;
    type ResponseAdapter<'a> = HttpResponseAdapter<'a>;

    #[instrument(level = "trace", skip_all, fields(method = %method_info))]
    fn client_request_adapter<'a>(
        &'a self,
        target: &'a mut dyn InterceptedTarget,
        method_info: &MethodInfo,
        _config: &dyn SensorConfig,
    ) -> Applicability<HttpRequestAdapter<'a>> {
        match target.as_http_connection() {
            Some(connection) => Applicability::Applicable(HttpRequestAdapter::new(
                connection,
                &self.options.trace_header,
            )),
            None => {
                trace!("Target is not an HTTP connection");
                Applicability::NotApplicable(NotApplicableReason::UnsupportedTarget)
            }
        }
    }

    #[instrument(
        level = "trace",
        skip_all,
        fields(method = %method_info, exception_occurred = exception_occurred)
    )]
    fn client_response_adapter<'a>(
        &'a self,
        target: &'a mut dyn InterceptedTarget,
        method_info: &MethodInfo,
        outcome: &'a CallOutcome,
        exception_occurred: bool,
        config: &dyn SensorConfig,
    ) -> Applicability<HttpResponseAdapter<'a>> {
        let Some(connection) = target.as_http_connection() else {
            trace!("Target is not an HTTP connection");
            return Applicability::NotApplicable(NotApplicableReason::UnsupportedTarget);
        };

        let intercepted = config.target_method_name();
        if intercepted != self.options.response_method {
            trace!(intercepted = intercepted, "Not the response-consuming method");
            return Applicability::NotApplicable(NotApplicableReason::NotResponseMethod);
        }

        let connection: &'a dyn HttpConnection = connection;
        Applicability::Applicable(HttpResponseAdapter::new(
            connection,
            outcome,
            exception_occurred,
        ))
    }
}
