use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, Environment};

/// Hosts accepted as the token domain in development
const DEV_DOMAINS: [&str; 2] = ["localhost", "127.0.0.1"];

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub authenticated: bool,
    pub domain: String,
    pub iat: i64,
    pub exp: i64,
}

/// JWT Service - creates and verifies admin session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    domain: String,
    environment: Environment,
    ttl: i64,
}

impl JwtService {
    pub fn new(config: &AuthConfig, environment: Environment) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            domain: config.domain.clone(),
            environment,
            ttl: config.token_ttl,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    /// Create a token for the configured domain
    pub fn create_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            authenticated: true,
            domain: self.domain.clone(),
            iat: now,
            exp: now + self.ttl,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Decode a token, checking signature and expiry only
    pub fn decode_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default()).map(|data| data.claims)
    }

    /// Whether `token` is a valid session for this deployment
    pub fn verify_token(&self, token: &str) -> bool {
        let claims = match self.decode_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected token: {}", e);
                return false;
            }
        };

        if !claims.authenticated {
            return false;
        }

        match self.environment {
            Environment::Development => DEV_DOMAINS.contains(&claims.domain.as_str()),
            Environment::Production => claims.domain == self.domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, domain: &str, environment: Environment) -> JwtService {
        let config = AuthConfig {
            jwt_secret: secret.to_string(),
            domain: domain.to_string(),
            ..Default::default()
        };
        JwtService::new(&config, environment)
    }

    #[test]
    fn test_create_and_verify_token() {
        let service = service("test_secret_key", "example.com", Environment::Production);
        let token = service.create_token().unwrap();

        assert!(service.verify_token(&token));
        let claims = service.decode_token(&token).unwrap();
        assert!(claims.authenticated);
        assert_eq!(claims.domain, "example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_invalid_token() {
        let service = service("test_secret_key", "localhost", Environment::Development);
        assert!(!service.verify_token("invalid_token"));
        assert!(!service.verify_token(""));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = service("secret1", "example.com", Environment::Production);
        let service2 = service("secret2", "example.com", Environment::Production);

        let token = service1.create_token().unwrap();
        assert!(!service2.verify_token(&token));
    }

    #[test]
    fn test_production_requires_matching_domain() {
        let issuer = service("shared", "other.org", Environment::Production);
        let verifier = service("shared", "example.com", Environment::Production);
        assert!(!verifier.verify_token(&issuer.create_token().unwrap()));
    }

    #[test]
    fn test_development_accepts_local_domains_only() {
        let local = service("shared", "127.0.0.1", Environment::Development);
        let remote = service("shared", "example.com", Environment::Development);

        assert!(local.verify_token(&local.create_token().unwrap()));
        assert!(remote.verify_token(&local.create_token().unwrap()));
        assert!(!local.verify_token(&remote.create_token().unwrap()));
    }

    #[test]
    fn test_expired_token() {
        let service = service("test_secret_key", "localhost", Environment::Development);
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            authenticated: true,
            domain: "localhost".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .unwrap();

        assert!(!service.verify_token(&token));
    }

    #[test]
    fn test_unauthenticated_claim_rejected() {
        let service = service("k", "localhost", Environment::Development);
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            authenticated: false,
            domain: "localhost".to_string(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap();
        assert!(!service.verify_token(&token));
    }
}
