use http::{
    header::{ToStrError, AUTHORIZATION},
    HeaderMap,
};

/// Reads the token from an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Default)]
pub struct BearerExtractor;

impl BearerExtractor {
    pub const fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip_all)]
    pub fn extract_bearer<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, BearerError> {
        let authorization = headers
            .get(AUTHORIZATION)
            .ok_or(BearerError::Missing)?
            .to_str()
            .map_err(BearerError::Ascii)?;

        // Auth schemes are case-insensitive.
        match authorization.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() => {
                Ok(token)
            }
            _ => Err(BearerError::Format),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header not found")]
    Missing,
    #[error("Authorization header ascii error: {0}")]
    Ascii(#[source] ToStrError),
    #[error("Authorization header is not in the form: `Bearer xyz`")]
    Format,
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(authorization: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(authorization));
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers("Bearer abc.def.ghi");

        let token = BearerExtractor::new()
            .extract_bearer(&headers)
            .expect("Failed to extract bearer");

        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(matches!(
            BearerExtractor::new().extract_bearer(&HeaderMap::new()),
            Err(BearerError::Missing)
        ));
    }

    #[test]
    fn other_schemes_are_rejected() {
        for authorization in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer ", "Bearerabc", "Token abc"] {
            let headers = headers(authorization);

            assert!(
                matches!(
                    BearerExtractor::new().extract_bearer(&headers),
                    Err(BearerError::Format)
                ),
                "{authorization} should be rejected"
            );
        }
    }

    #[test]
    fn scheme_is_matched_case_insensitively() {
        for authorization in ["bearer abc.def.ghi", "BEARER abc.def.ghi", "bEaReR abc.def.ghi"] {
            let headers = headers(authorization);

            assert_eq!(
                BearerExtractor::new()
                    .extract_bearer(&headers)
                    .expect("Failed to extract bearer"),
                "abc.def.ghi",
                "{authorization} should be accepted"
            );
        }
    }
}
