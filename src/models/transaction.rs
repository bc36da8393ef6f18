//! Transaction models
//!
//! Two record kinds move money: a cash flow touches one account (income or
//! expense) and a transfer moves an amount between two accounts. The
//! `Transaction` enum is the read-only union the aggregator exposes; the
//! only thing the variants share is the common field set, so accessors live
//! on the enum instead of a base type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Direction of a cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowKind {
    /// Money coming into the account
    Income,
    /// Money leaving the account
    Expense,
}

impl CashFlowKind {
    /// Parse a kind from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Reporting view of a record's type, covering both record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A single-account income or expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlow {
    /// Unique identifier
    pub id: TransactionId,

    /// Recorded amount, always positive; the kind decides the sign of the
    /// balance effect
    pub amount: Money,

    /// Free-form description
    pub description: Option<String>,

    /// Transaction date
    pub date: NaiveDate,

    /// Income or expense
    pub kind: CashFlowKind,

    /// The account this record belongs to
    pub account_id: AccountId,
}

impl CashFlow {
    /// Create a new cash flow record
    pub fn new(
        amount: Money,
        description: Option<String>,
        date: NaiveDate,
        kind: CashFlowKind,
        account_id: AccountId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            description,
            date,
            kind,
            account_id,
        }
    }

    /// Signed delta this record applies to its account's balance
    pub fn signed_effect(&self) -> Money {
        match self.kind {
            CashFlowKind::Income => self.amount,
            CashFlowKind::Expense => -self.amount,
        }
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if !self.amount.is_positive() {
            return Err(RecordValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount
        )
    }
}

/// A two-account movement: the source loses the amount, the target gains it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier
    pub id: TransactionId,

    /// Recorded amount, always positive
    pub amount: Money,

    /// Free-form description
    pub description: Option<String>,

    /// Transaction date
    pub date: NaiveDate,

    /// Account the amount leaves
    pub source_account_id: AccountId,

    /// Account the amount arrives in
    pub target_account_id: AccountId,
}

impl Transfer {
    /// Create a new transfer record
    pub fn new(
        amount: Money,
        description: Option<String>,
        date: NaiveDate,
        source_account_id: AccountId,
        target_account_id: AccountId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            description,
            date,
            source_account_id,
            target_account_id,
        }
    }

    /// Check whether an account is on either side of this transfer
    pub fn touches(&self, account_id: AccountId) -> bool {
        self.source_account_id == account_id || self.target_account_id == account_id
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if !self.amount.is_positive() {
            return Err(RecordValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Transfer {}", self.date.format("%Y-%m-%d"), self.amount)
    }
}

/// Union of the two record kinds, used for "all transactions" views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Transaction {
    CashFlow(CashFlow),
    Transfer(Transfer),
}

impl Transaction {
    pub fn id(&self) -> TransactionId {
        match self {
            Self::CashFlow(flow) => flow.id,
            Self::Transfer(transfer) => transfer.id,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::CashFlow(flow) => flow.amount,
            Self::Transfer(transfer) => transfer.amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::CashFlow(flow) => flow.date,
            Self::Transfer(transfer) => transfer.date,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::CashFlow(flow) => flow.description.as_deref(),
            Self::Transfer(transfer) => transfer.description.as_deref(),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::CashFlow(flow) => match flow.kind {
                CashFlowKind::Income => TransactionType::Income,
                CashFlowKind::Expense => TransactionType::Expense,
            },
            Self::Transfer(_) => TransactionType::Transfer,
        }
    }
}

/// Validation errors shared by both record kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}
