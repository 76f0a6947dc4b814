//! Credit-gated access policy
//!
//! Decides the outcome of a download request over two independent axes:
//! authentication state and the session's prior anonymous attempt count.
//! The balance check for paid downloads happens locally before any request
//! is sent; the collaborator's rejection remains authoritative either way.

use crate::errors::{AppError, Result};
use crate::models::Account;
use crate::DOWNLOAD_CREDIT_COST;
use serde::{Deserialize, Serialize};

/// Authentication state of the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Account),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn account(&self) -> Option<&Account> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(acct) => Some(acct),
        }
    }
}

/// Outcome of a download decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadDecision {
    /// Anonymous, zero prior attempts: serve content, bump the attempt
    /// counter to 1, touch no balance
    Free,
    /// Anonymous with a prior attempt: refuse and prompt authentication,
    /// no side effects
    LoginRequired,
    /// Authenticated with sufficient balance: decrement must be confirmed
    /// by the collaborator before content is revealed
    Paid,
}

/// The rule set gating downloads
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide the outcome for one download attempt
    ///
    /// Once a session authenticates, the attempt counter is abandoned and
    /// every download follows the paid branch.
    pub fn decide(&self, auth: &AuthState, prior_attempts: u32) -> Result<DownloadDecision> {
        match auth {
            AuthState::Anonymous => {
                if prior_attempts == 0 {
                    Ok(DownloadDecision::Free)
                } else {
                    Ok(DownloadDecision::LoginRequired)
                }
            }
            AuthState::Authenticated(account) => {
                if account.credits < DOWNLOAD_CREDIT_COST {
                    return Err(AppError::InsufficientCredits {
                        balance: account.credits,
                    });
                }
                Ok(DownloadDecision::Paid)
            }
        }
    }
}
