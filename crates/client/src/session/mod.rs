//! Session context
//!
//! The single owner of all cross-cutting mutable client state: the
//! authenticated account (and its credit balance) and the anonymous
//! download-attempt counter. Every mutation is the direct consequence of a
//! user-initiated action's resolved response; nothing is updated
//! optimistically before the collaborator confirms.

use crate::api::{LoginRequest, NotesApi, RegisterRequest, UploadReceipt};
use crate::metrics::{record_download, record_upload};
use crate::token::TokenStore;
use noteshare_core::errors::{AppError, Result};
use noteshare_core::models::{Account, Note};
use noteshare_core::policy::{AccessPolicy, AuthState, DownloadDecision};
use noteshare_core::upload::{NoteSubmission, TaxonomyContext};
use std::sync::Arc;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

/// Outcome of a granted download
#[derive(Debug, Clone)]
pub struct DownloadGrant {
    pub decision: DownloadDecision,

    /// Updated balance after a paid download, confirmed server-side
    pub credits: Option<u32>,

    /// Content locator revealed to the user
    pub download_url: Option<String>,
}

/// The current user session
pub struct Session {
    api: Arc<dyn NotesApi>,
    store: Arc<dyn TokenStore>,
    policy: AccessPolicy,
    auth: AuthState,
    download_attempts: u32,
}

impl Session {
    pub fn new(api: Arc<dyn NotesApi>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            policy: AccessPolicy,
            auth: AuthState::Anonymous,
            download_attempts: 0,
        }
    }

    /// Restore a persisted session, if a credential is stored
    ///
    /// Best-effort: a failed restore discards the credential and leaves the
    /// session anonymous instead of failing the caller.
    pub async fn bootstrap(&mut self) -> Result<()> {
        if self.store.load()?.is_none() {
            return Ok(());
        }

        match self.api.current_account().await {
            Ok(account) => {
                info!(email = %account.email, "Session restored");
                self.auth = AuthState::Authenticated(account);
            }
            Err(err) => {
                warn!(error = %err, "Session restore failed, reverting to anonymous");
                if let Err(err) = self.store.clear() {
                    warn!(error = %err, "Failed to discard stale credential");
                }
                self.auth = AuthState::Anonymous;
            }
        }
        Ok(())
    }

    /// Register a new account; grants the starting credit balance
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Account> {
        request.validate().map_err(first_validation_error)?;

        let response = self.api.register(request).await?;
        self.store.save(&response.token)?;
        self.auth = AuthState::Authenticated(response.user.clone());

        info!("Account created");
        Ok(response.user)
    }

    /// Authenticate an existing account
    ///
    /// The anonymous attempt counter is abandoned: downloads from here on
    /// follow the paid branch exclusively.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<Account> {
        request.validate().map_err(first_validation_error)?;

        let response = self.api.login(request).await?;
        self.store.save(&response.token)?;
        self.auth = AuthState::Authenticated(response.user.clone());

        info!("Login successful");
        Ok(response.user)
    }

    /// End the session: release the credential, reset the attempt counter
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear credential on logout");
        }
        self.auth = AuthState::Anonymous;
        self.download_attempts = 0;
        info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn account(&self) -> Option<&Account> {
        self.auth.account()
    }

    /// Current credit balance; zero while anonymous
    pub fn credits(&self) -> u32 {
        self.account().map(|a| a.credits).unwrap_or(0)
    }

    pub fn download_attempts(&self) -> u32 {
        self.download_attempts
    }

    /// Attempt to download a note under the access policy
    ///
    /// Paid downloads only reveal the content locator after the collaborator
    /// confirms the credit decrement. A refused attempt has no side effects.
    pub async fn download(&mut self, note: &Note) -> Result<DownloadGrant> {
        let decision = self
            .policy
            .decide(&self.auth, self.download_attempts)
            .inspect_err(|_| record_download("refused"))?;

        match decision {
            DownloadDecision::Free => {
                self.download_attempts += 1;
                record_download("free");
                info!(note_id = %note.id, attempts = self.download_attempts, "Free download served");
                Ok(DownloadGrant {
                    decision,
                    credits: None,
                    download_url: note.file_path.clone(),
                })
            }
            DownloadDecision::LoginRequired => {
                record_download("refused");
                Err(AppError::LoginRequired)
            }
            DownloadDecision::Paid => {
                let receipt = match self.api.download_note(&note.id).await {
                    Ok(receipt) => receipt,
                    Err(err) => {
                        record_download("refused");
                        self.handle_auth_failure(&err);
                        return Err(err);
                    }
                };

                // Balance applied only from the confirmed response
                self.apply_credits(receipt.credits);
                record_download("paid");
                info!(
                    note_id = %note.id,
                    credits = receipt.credits,
                    "Paid download confirmed"
                );

                Ok(DownloadGrant {
                    decision,
                    credits: Some(receipt.credits),
                    download_url: receipt.download_url.or(receipt.file_path),
                })
            }
        }
    }

    /// Submit a note through the upload pipeline
    ///
    /// Validation happens entirely before the request; the credit reward is
    /// applied only from the collaborator's confirmed receipt.
    pub async fn upload(
        &mut self,
        submission: &NoteSubmission,
        context: &TaxonomyContext,
    ) -> Result<UploadReceipt> {
        if !self.is_authenticated() {
            return Err(AppError::LoginRequired);
        }

        let validated = submission.validate(context)?;

        let receipt = match self.api.upload_note(&validated).await {
            Ok(receipt) => receipt,
            Err(err) => {
                record_upload(false);
                self.handle_auth_failure(&err);
                return Err(err);
            }
        };

        self.apply_credits(receipt.credits);
        record_upload(true);
        info!(
            note_id = %receipt.note.id,
            title = %receipt.note.title,
            credits = receipt.credits,
            "Upload accepted"
        );

        Ok(receipt)
    }

    fn apply_credits(&mut self, credits: u32) {
        if let AuthState::Authenticated(account) = &mut self.auth {
            account.credits = credits;
        }
    }

    /// On an authorization failure the credential is already discarded by
    /// the transport; drop the in-memory account as well
    fn handle_auth_failure(&mut self, err: &AppError) {
        if err.is_auth_failure() {
            warn!("Authorization failure, session reverts to anonymous");
            if let Err(err) = self.store.clear() {
                warn!(error = %err, "Failed to clear credential");
            }
            self.auth = AuthState::Anonymous;
        }
    }
}

/// Map the first failing field to an inline validation error
fn first_validation_error(errors: ValidationErrors) -> AppError {
    for (field, field_errors) in errors.field_errors() {
        if let Some(err) = field_errors.first() {
            let message = err
                .message
                .clone()
                .map(|m| m.into_owned())
                .unwrap_or_else(|| err.code.to_string());
            return AppError::Validation {
                message,
                field: Some(field.to_string()),
            };
        }
    }
    AppError::Validation {
        message: "invalid input".to_string(),
        field: None,
    }
}
