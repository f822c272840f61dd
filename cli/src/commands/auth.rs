//! Access token resolution
//!
//! Emits its diagnostics under [`AUTH_TRACE_TARGET`] so `--debug` can capture
//! them through the auth trace source.

use netrm_common::{NetrmError, NetrmResult, AUTH_TRACE_TARGET};

/// Where a token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// `--access-token` or `NETRM_ACCESS_TOKEN`
    Argument,
    /// Profile config file
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    origin: TokenOrigin,
}

impl AccessToken {
    pub fn origin(&self) -> TokenOrigin {
        self.origin
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

/// Pick the first usable token: argument first, then profile
pub fn resolve_token(argument: Option<&str>, profile: Option<&str>) -> NetrmResult<AccessToken> {
    tracing::debug!(target: AUTH_TRACE_TARGET, "resolving access token");

    for (candidate, origin) in [(argument, TokenOrigin::Argument), (profile, TokenOrigin::Profile)] {
        match candidate.map(str::trim) {
            Some("") => {
                tracing::warn!(target: AUTH_TRACE_TARGET, origin = ?origin, "ignoring blank access token");
            }
            Some(secret) => {
                tracing::debug!(
                    target: AUTH_TRACE_TARGET,
                    origin = ?origin,
                    length = secret.len(),
                    "access token acquired"
                );
                return Ok(AccessToken {
                    secret: secret.to_string(),
                    origin,
                });
            }
            None => {
                tracing::trace!(target: AUTH_TRACE_TARGET, origin = ?origin, "no access token");
            }
        }
    }

    tracing::error!(target: AUTH_TRACE_TARGET, "no access token available");
    Err(NetrmError::Auth(
        "no access token; pass --access-token, set NETRM_ACCESS_TOKEN, or run `netrm config set access_token <token>`".into(),
    ))
}
