use tally_domain::{Category, TransactionKind};

const CATEGORY_LABELS: [(&str, &str); 10] = [
    ("food", "🍔 Food"),
    ("transport", "🚗 Transport"),
    ("entertainment", "🎬 Entertainment"),
    ("shopping", "🛍️ Shopping"),
    ("bills", "💡 Bills"),
    ("health", "🏥 Health"),
    ("education", "📚 Education"),
    ("salary", "💼 Salary"),
    ("freelance", "💻 Freelance"),
    ("other", "📦 Other"),
];

/// Display label for a category; unknown categories are shown verbatim.
pub fn category_label(category: &Category) -> String {
    CATEGORY_LABELS
        .iter()
        .find(|(key, _)| *key == category.as_str())
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| category.to_string())
}

pub fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}
