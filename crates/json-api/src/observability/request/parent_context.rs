//! W3C trace context extraction.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The caller's span context, if the request carried a valid `traceparent`.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

        context
            .span()
            .span_context()
            .is_valid()
            .then_some(context.clone())
    })
}

#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::header::HeaderValue;

    use super::*;

    fn headers(traceparent: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("traceparent", HeaderValue::from_static(traceparent));

        headers
    }

    #[test]
    fn valid_traceparent_yields_parent() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let parent = extract_parent_context(&headers(
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
        ));

        assert!(parent.is_some(), "a well formed traceparent should be honoured");
    }

    #[test]
    fn missing_or_malformed_traceparent_is_ignored() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        assert!(extract_parent_context(&HeaderMap::new()).is_none(), "no header, no parent");
        assert!(
            extract_parent_context(&headers("not-a-trace")).is_none(),
            "garbage must not become a parent"
        );
    }
}
