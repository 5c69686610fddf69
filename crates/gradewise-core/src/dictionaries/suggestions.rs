//! Simpler replacements for common hard words.
//!
//! Keys and values are lowercase; callers adapt the case to the original token.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Hard word → simpler word.
pub static SUGGESTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("accommodate", "fit"),
        ("accomplish", "do"),
        ("accumulate", "gather"),
        ("additional", "more"),
        ("alternatively", "or"),
        ("anticipate", "expect"),
        ("approximately", "about"),
        ("assistance", "help"),
        ("beneficial", "helpful"),
        ("commence", "start"),
        ("communicate", "tell"),
        ("component", "part"),
        ("comprehend", "understand"),
        ("consequently", "so"),
        ("considerable", "large"),
        ("considerably", "much"),
        ("demonstrate", "show"),
        ("difficulty", "trouble"),
        ("eliminate", "remove"),
        ("encounter", "meet"),
        ("equivalent", "equal"),
        ("excessively", "too"),
        ("facilitate", "help"),
        ("frequently", "often"),
        ("immediately", "now"),
        ("individual", "person"),
        ("indicate", "show"),
        ("initiate", "start"),
        ("magnitude", "size"),
        ("modification", "change"),
        ("numerous", "many"),
        ("objective", "goal"),
        ("obligation", "duty"),
        ("optimal", "best"),
        ("participate", "join"),
        ("previously", "before"),
        ("primarily", "mostly"),
        ("procedure", "steps"),
        ("purchase", "buy"),
        ("regarding", "about"),
        ("remainder", "rest"),
        ("requirement", "need"),
        ("subsequently", "later"),
        ("sufficient", "enough"),
        ("terminate", "end"),
        ("utilize", "use"),
        ("utilization", "use"),
    ]
    .into_iter()
    .collect()
});

/// Look up a simpler word for a lowercase hard word.
pub fn suggestion_for(word: &str) -> Option<&'static str> {
    SUGGESTIONS.get(word).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_lowercase() {
        for (hard, easy) in SUGGESTIONS.iter() {
            assert_eq!(*hard, hard.to_lowercase());
            assert_eq!(*easy, easy.to_lowercase());
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(suggestion_for("utilize"), Some("use"));
        assert_eq!(suggestion_for("Utilize"), None);
        assert_eq!(suggestion_for("cat"), None);
    }
}
