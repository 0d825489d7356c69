use http::{HeaderName, HeaderValue, Method};
use pack_config::{AnyOrHttpMethodArray, AnyOrStringArray, AnyOrUrlArray, CorsConfig, HttpMethod};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub(super) fn generate(config: &CorsConfig) -> CorsLayer {
    let mut cors_layer = CorsLayer::new().allow_credentials(config.allow_credentials);

    if let Some(max_age) = config.max_age {
        cors_layer = cors_layer.max_age(max_age);
    }

    if let Some(ref origins) = config.allow_origins {
        cors_layer = cors_layer.allow_origin(allow_origin(origins));
    }

    if let Some(ref methods) = config.allow_methods {
        cors_layer = cors_layer.allow_methods(allow_methods(methods));
    }

    if let Some(ref headers) = config.allow_headers {
        cors_layer = cors_layer.allow_headers(allow_headers(headers));
    }

    cors_layer
}

fn allow_origin(origins: &AnyOrUrlArray) -> AllowOrigin {
    match origins {
        AnyOrUrlArray::Any => AllowOrigin::any(),
        AnyOrUrlArray::Explicit(origins) => {
            // browsers send the origin without a trailing slash, urls always carry one
            let origins = origins
                .iter()
                .map(|url| url.as_str())
                .map(|url| url.strip_suffix('/').unwrap_or(url))
                .filter_map(|url| HeaderValue::from_str(url).ok());

            AllowOrigin::list(origins)
        }
    }
}

fn allow_methods(methods: &AnyOrHttpMethodArray) -> AllowMethods {
    match methods {
        AnyOrHttpMethodArray::Any => AllowMethods::any(),
        AnyOrHttpMethodArray::Explicit(methods) => AllowMethods::list(methods.iter().map(|method| to_method(*method))),
    }
}

fn allow_headers(headers: &AnyOrStringArray) -> AllowHeaders {
    match headers {
        AnyOrStringArray::Any => AllowHeaders::any(),
        AnyOrStringArray::Explicit(headers) => {
            let headers = headers.iter().filter_map(|header| match HeaderName::from_bytes(header.as_bytes()) {
                Ok(name) => Some(name),
                Err(_) => {
                    tracing::warn!("ignoring invalid CORS header name {header:?}");
                    None
                }
            });

            AllowHeaders::list(headers)
        }
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Patch => Method::PATCH,
    }
}
