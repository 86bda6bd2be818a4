//! Posted transactions of the open billing cycle

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::bill::BillDetail;
use crate::config::BILL_DATE_FORMAT;
use crate::types::*;

/// Posted charges of one billing cycle, in bill order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionSet {
    transactions: Vec<PostedTransaction>,
}

impl TransactionSet {
    /// Create a transaction set from already posted transactions
    pub fn new(transactions: Vec<PostedTransaction>) -> Self {
        Self { transactions }
    }

    /// Build the set from a bill detail, dropping rows without charges
    pub fn from_detail(detail: &BillDetail) -> ReconcileResult<Self> {
        let mut transactions = Vec::with_capacity(detail.line_items().len());
        for item in detail.line_items() {
            if let Some(txn) = item.to_posted(BILL_DATE_FORMAT)? {
                transactions.push(txn);
            }
        }

        let set = Self { transactions };
        tracing::debug!(
            posted = set.len(),
            skipped = detail.line_items().len() - set.len(),
            total_minor = %set.total_minor(),
            "built transaction set from bill detail"
        );

        Ok(set)
    }

    /// Iterate over transactions in bill order
    pub fn iter(&self) -> std::slice::Iter<'_, PostedTransaction> {
        self.transactions.iter()
    }

    /// Transactions whose title equals `title` exactly
    pub fn matching<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a PostedTransaction> {
        self.transactions.iter().filter(move |txn| txn.title == title)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all amounts in minor units, without overflow
    pub fn total_minor(&self) -> BigDecimal {
        self.transactions
            .iter()
            .map(|txn| BigDecimal::from(txn.amount))
            .sum()
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a PostedTransaction;
    type IntoIter = std::slice::Iter<'a, PostedTransaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PostedTransaction> for TransactionSet {
    fn from_iter<I: IntoIterator<Item = PostedTransaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
