use axum::http::{HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

/// Env var holding a comma-separated origin allow-list.
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer restricted to the given origins.
///
/// The gateway is read-only, so only GET and OPTIONS are allowed.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Creates a CORS layer that accepts any origin, method and header and
/// allows credentials by mirroring the request origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or blank means any origin is accepted. Otherwise the value is a
/// comma-separated list, e.g. `http://localhost:3000,https://citecrawler.app`.
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let Some(origins_str) = core_config::env_optional(CORS_ALLOWED_ORIGIN) else {
        info!("CORS: allowing any origin");
        return Ok(create_permissive_cors_layer());
    };

    let allowed_origins = parse_origins(&origins_str)?;
    if allowed_origins.is_empty() {
        info!("CORS: allowing any origin");
        return Ok(create_permissive_cors_layer());
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(create_cors_layer(allowed_origins))
}

fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN, e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("http://localhost:3000, ,https://example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_origins_rejects_invalid_header_value() {
        let err = parse_origins("http://bad\nhost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cors_layer_from_env_defaults_to_permissive() {
        temp_env::with_var_unset(CORS_ALLOWED_ORIGIN, || {
            assert!(cors_layer_from_env().is_ok());
        });
    }

    #[test]
    fn test_cors_layer_from_env_with_list() {
        temp_env::with_var(CORS_ALLOWED_ORIGIN, Some("http://localhost:5173"), || {
            assert!(cors_layer_from_env().is_ok());
        });
    }
}
