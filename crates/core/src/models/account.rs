//! Account entity and credit movements
//!
//! The credit balance is an unsigned integer: it can never go negative by
//! construction, and the access policy refuses a paid download before the
//! balance would be exceeded. Every balance change is a direct consequence
//! of a confirmed collaborator response.

use crate::errors::{AppError, Result};
use crate::{DOWNLOAD_CREDIT_COST, UPLOAD_CREDIT_REWARD};
use serde::{Deserialize, Serialize};

/// A registered user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    pub email: String,

    pub university: String,

    /// Current credit balance; starts at `INITIAL_CREDITS` on registration
    pub credits: u32,
}

impl Account {
    /// Apply the reward for one accepted upload
    pub fn grant_upload_credit(&mut self) {
        self.credits += UPLOAD_CREDIT_REWARD;
    }

    /// Spend the cost of one paid download
    ///
    /// Fails without mutating when the balance cannot cover the cost.
    pub fn spend_download_credit(&mut self) -> Result<()> {
        if self.credits < DOWNLOAD_CREDIT_COST {
            return Err(AppError::InsufficientCredits {
                balance: self.credits,
            });
        }
        self.credits -= DOWNLOAD_CREDIT_COST;
        Ok(())
    }
}
