// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the Moneydash backend. Every protected request goes
//! through [`ApiClient::dispatch`], which attaches the bearer token and
//! recovers from token expiry exactly once: a 401 triggers one refresh call
//! and one retry, and the retry's outcome is returned as-is. Refresh is
//! single-flight — the session sits behind a mutex held for the duration of
//! the refresh call, and a caller that finds the token already rotated skips
//! its own refresh.

use crate::models::{
    Account, ApiErrorBody, AuthResponse, Budget, BudgetWithProgress, Category, CategorySpending,
    DashboardOverview, Paginated, Transaction, TransactionWithDetails, User,
};
use crate::session::Session;
use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

const UA: &str = concat!(
    "moneydash/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/moneydash)"
);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Terminal auth failure: the refresh itself was rejected or no refresh
    /// token was stored. Credentials have already been purged.
    #[error("Session expired, please log in again")]
    SessionExpired,
    /// Non-2xx backend response, carrying the backend's `detail` message.
    #[error("{detail} (HTTP {status})")]
    Api { status: u16, detail: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Mutex<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.into(),
            session: Mutex::new(session),
        })
    }

    pub fn session(&self) -> MutexGuard<'_, Session> {
        // A poisoned lock only means another caller panicked mid-request;
        // the session data itself is still consistent.
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Response, reqwest::Error> {
        debug!(%method, path, "dispatching request");
        let mut req = self.http.request(method, format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        if let Some(t) = token {
            req = req.bearer_auth(t);
        }
        req.send()
    }

    /// Issue a protected request. Any status other than 401 is returned (or
    /// mapped) directly; a 401 goes through the refresh-and-retry cycle.
    fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let token = self.session().access_token().map(str::to_string);
        let resp = self.send(method.clone(), path, query, body, token.as_deref())?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return check(resp);
        }
        warn!(path, "received 401, refreshing session");
        let fresh = self.refresh_access_token(token.as_deref())?;
        // Exactly one retry; a second 401 comes back to the caller untouched.
        let resp = self.send(method, path, query, body, Some(&fresh))?;
        check(resp)
    }

    /// Rotate the token pair, or tear the session down if that fails. Holding
    /// the session lock across the refresh call makes it single-flight:
    /// concurrent 401 observers queue here, and all but the first find the
    /// token already rotated.
    fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let mut session = self.session();
        if let Some(current) = session.access_token() {
            if stale != Some(current) {
                debug!("token already rotated by a concurrent refresh");
                return Ok(current.to_string());
            }
        }
        let Some(refresh) = session.refresh_token().map(str::to_string) else {
            session.clear();
            return Err(ApiError::SessionExpired);
        };
        let outcome = self
            .send(
                Method::POST,
                "/auth/refresh",
                &[],
                Some(&json!({ "refresh_token": refresh })),
                None,
            )
            .map_err(ApiError::from)
            .and_then(check)
            .and_then(|r| r.json::<AuthResponse>().map_err(ApiError::from));
        match outcome {
            Ok(tokens) => {
                session.set_tokens(&tokens.access_token, &tokens.refresh_token)?;
                debug!("session refreshed");
                Ok(tokens.access_token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, clearing session");
                session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        Ok(self.dispatch(Method::GET, path, query, None)?.json()?)
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, ApiError> {
        Ok(self.dispatch(Method::POST, path, &[], Some(body))?.json()?)
    }

    fn put_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, ApiError> {
        Ok(self.dispatch(Method::PUT, path, &[], Some(body))?.json()?)
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(Method::DELETE, path, &[], None)?;
        Ok(())
    }

    // --- auth ---

    /// Exchange credentials for a token pair, persist it, then fetch the
    /// profile. A failed profile fetch does not revert authentication; the
    /// session proceeds without a user record.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<User>, ApiError> {
        let resp = self.send(
            Method::POST,
            "/auth/login",
            &[],
            Some(&json!({ "email": email, "password": password })),
            None,
        )?;
        let tokens: AuthResponse = check(resp)?.json()?;
        self.session()
            .set_tokens(&tokens.access_token, &tokens.refresh_token)?;
        match self.me() {
            Ok(user) => {
                self.session().set_user(user.clone())?;
                Ok(Some(user))
            }
            Err(err) => {
                debug!(error = %err, "profile fetch failed, proceeding without user record");
                Ok(None)
            }
        }
    }

    /// Create the user record. The backend does not hand out tokens here;
    /// callers follow up with [`ApiClient::login`].
    pub fn register(&self, email: &str, password: &str, full_name: &str) -> Result<User, ApiError> {
        let resp = self.send(
            Method::POST,
            "/auth/register",
            &[],
            Some(&json!({
                "email": email,
                "password": password,
                "full_name": full_name,
            })),
            None,
        )?;
        Ok(check(resp)?.json()?)
    }

    pub fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me", &[])
    }

    pub fn logout(&self) {
        self.session().clear();
    }

    // --- accounts ---

    pub fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/accounts", &[])
    }

    pub fn get_account(&self, id: i64) -> Result<Account, ApiError> {
        self.get_json(&format!("/accounts/{}", id), &[])
    }

    pub fn create_account(&self, body: &Value) -> Result<Account, ApiError> {
        self.post_json("/accounts", body)
    }

    pub fn update_account(&self, id: i64, body: &Value) -> Result<Account, ApiError> {
        self.put_json(&format!("/accounts/{}", id), body)
    }

    pub fn delete_account(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/accounts/{}", id))
    }

    // --- transactions ---

    pub fn list_transactions(
        &self,
        query: &[(&str, String)],
    ) -> Result<Paginated<TransactionWithDetails>, ApiError> {
        self.get_json("/transactions", query)
    }

    pub fn create_transaction(&self, body: &Value) -> Result<Transaction, ApiError> {
        self.post_json("/transactions", body)
    }

    pub fn update_transaction(&self, id: i64, body: &Value) -> Result<Transaction, ApiError> {
        self.put_json(&format!("/transactions/{}", id), body)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/transactions/{}", id))
    }

    /// The export endpoint returns an opaque CSV or JSON payload; the caller
    /// saves it wherever it likes.
    pub fn export_transactions(&self, format: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self.dispatch(
            Method::GET,
            "/transactions/export",
            &[("format", format.to_string())],
            None,
        )?;
        Ok(resp.bytes()?.to_vec())
    }

    // --- budgets ---

    pub fn list_budgets(&self) -> Result<Vec<BudgetWithProgress>, ApiError> {
        self.get_json("/budgets", &[])
    }

    pub fn get_budget(&self, id: i64) -> Result<BudgetWithProgress, ApiError> {
        self.get_json(&format!("/budgets/{}", id), &[])
    }

    pub fn create_budget(&self, body: &Value) -> Result<Budget, ApiError> {
        self.post_json("/budgets", body)
    }

    pub fn delete_budget(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/budgets/{}", id))
    }

    // --- categories ---

    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories", &[])
    }

    pub fn create_category(&self, body: &Value) -> Result<Category, ApiError> {
        self.post_json("/categories", body)
    }

    pub fn update_category(&self, id: i64, body: &Value) -> Result<Category, ApiError> {
        self.put_json(&format!("/categories/{}", id), body)
    }

    pub fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{}", id))
    }

    // --- dashboard ---

    pub fn dashboard_overview(&self) -> Result<DashboardOverview, ApiError> {
        self.get_json("/dashboard/overview", &[])
    }

    pub fn spending_by_category(&self) -> Result<Vec<CategorySpending>, ApiError> {
        self.get_json("/dashboard/spending-by-category", &[])
    }

    pub fn accounts_summary(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/dashboard/accounts-summary", &[])
    }

    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(
            "/dashboard/recent-transactions",
            &[("limit", limit.to_string())],
        )
    }
}

/// Map non-2xx responses to [`ApiError::Api`], keeping the backend's `detail`
/// message when the body carries one.
fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp
        .json::<ApiErrorBody>()
        .map(|b| b.detail)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(ApiError::Api {
        status: status.as_u16(),
        detail,
    })
}
