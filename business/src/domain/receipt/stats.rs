use std::collections::HashMap;

use super::model::Receipt;

/// Spend accumulated under one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    pub receipt_count: usize,
}

/// Spend accumulated under one merchant.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantSpend {
    pub merchant: String,
    pub amount: f64,
    pub receipt_count: usize,
}

#[derive(Debug, Clone)]
pub struct SpendingStats {
    pub total_spent: f64,
    pub receipt_count: usize,
    pub by_category: Vec<CategorySpend>,
    pub by_merchant: Vec<MerchantSpend>,
}

/// Aggregates spending over a set of receipts.
///
/// Amounts are summed as-is regardless of currency; groups are ordered by
/// amount descending, ties broken alphabetically so output is stable.
pub fn spending_stats(receipts: &[Receipt]) -> SpendingStats {
    let total_spent = receipts.iter().map(|r| r.total).sum();

    let mut categories: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut merchants: HashMap<&str, (f64, usize)> = HashMap::new();
    for receipt in receipts {
        let category = categories.entry(receipt.category.as_str()).or_default();
        category.0 += receipt.total;
        category.1 += 1;
        let merchant = merchants.entry(receipt.merchant.as_str()).or_default();
        merchant.0 += receipt.total;
        merchant.1 += 1;
    }

    let mut by_category: Vec<CategorySpend> = categories
        .into_iter()
        .map(|(category, (amount, receipt_count))| CategorySpend {
            category: category.to_string(),
            amount,
            receipt_count,
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    let mut by_merchant: Vec<MerchantSpend> = merchants
        .into_iter()
        .map(|(merchant, (amount, receipt_count))| MerchantSpend {
            merchant: merchant.to_string(),
            amount,
            receipt_count,
        })
        .collect();
    by_merchant.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });

    SpendingStats {
        total_spent,
        receipt_count: receipts.len(),
        by_category,
        by_merchant,
    }
}
