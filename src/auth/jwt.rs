use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::auth::claims::{Claims, Role, TokenKind};
use crate::config::JwtConfig;
use crate::state::AppState;

/// Access/refresh pair issued together on signup, login and refresh.
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: Duration::from_secs((config.ttl_minutes as u64) * 60),
            refresh_ttl: Duration::from_secs((config.refresh_ttl_minutes as u64) * 60),
        }
    }

    fn issue(&self, user_id: Uuid, roles: &[Role], kind: TokenKind) -> anyhow::Result<String> {
        let issued_at = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id,
            iat: issued_at.unix_timestamp() as usize,
            exp: (issued_at + ttl).unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
            roles: roles.to_vec(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, "jwt issued");
        Ok(token)
    }

    pub fn pair(&self, user_id: Uuid, roles: &[Role]) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user_id, roles, TokenKind::Access)?,
            refresh: self.issue(user_id, roles, TokenKind::Refresh)?,
        })
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(std::slice::from_ref(&self.audience));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            anyhow::bail!("not a refresh token");
        }
        Ok(claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        })
    }

    #[test]
    fn access_token_round_trips() {
        let keys = keys("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let pair = keys.pair(user_id, &[Role::User]).expect("issue pair");
        let claims = keys.verify(&pair.access).expect("verify access");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.roles, vec![Role::User]);
    }

    #[test]
    fn roles_survive_the_round_trip() {
        let keys = keys("dev-secret", "iss", "aud");
        let pair = keys
            .pair(Uuid::new_v4(), &[Role::User, Role::Admin])
            .expect("issue pair");
        let claims = keys.verify(&pair.access).expect("verify access");
        assert!(claims.roles.contains(&Role::Admin));
        assert!(claims.roles.contains(&Role::User));
    }

    #[test]
    fn refresh_kind_is_enforced() {
        let keys = keys("dev-secret", "iss", "aud");
        let user_id = Uuid::new_v4();
        let pair = keys.pair(user_id, &[Role::User]).expect("issue pair");

        let claims = keys.verify_refresh(&pair.refresh).expect("verify refresh");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.kind, TokenKind::Refresh);

        let err = keys.verify_refresh(&pair.access).unwrap_err();
        assert!(err.to_string().contains("not a refresh token"));
    }

    #[test]
    fn issuer_and_audience_are_checked() {
        let good = keys("same-secret", "good-iss", "good-aud");
        let bad = keys("same-secret", "bad-iss", "bad-aud");
        let pair = good.pair(Uuid::new_v4(), &[Role::User]).expect("issue pair");
        assert!(bad.verify(&pair.access).is_err());
    }

    #[test]
    fn tampered_secret_is_rejected() {
        let good = keys("secret-a", "iss", "aud");
        let other = keys("secret-b", "iss", "aud");
        let pair = good.pair(Uuid::new_v4(), &[Role::User]).expect("issue pair");
        assert!(other.verify(&pair.access).is_err());
    }
}
