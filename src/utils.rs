use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

/// Tokens the tabular reader treats as "no value" in addition to the empty field.
const MISSING_VALUE_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[inline]
pub(crate) fn is_missing_value(field: &str) -> bool {
    field.is_empty() || MISSING_VALUE_TOKENS.contains(&field)
}

pub(crate) fn progress_bar(len: u64, message: &'static str, visible: bool) -> ProgressBar {
    static STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
        ProgressStyle::default_bar()
            .template("{msg}: [{elapsed_precise}] [{wide_bar}] {pos}/{len} ({eta})")
            .unwrap()
    });
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len).with_style(STYLE.clone());
    bar.set_message(message);
    bar
}
