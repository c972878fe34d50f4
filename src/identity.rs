/// Maps a raw player name to the canonical key used across tables. Lineup
/// sheets, injury lists and stat exports rarely agree on spelling, so the
/// matching policy is a seam rather than string heuristics inlined into
/// the scoring path.
pub trait NameResolver {
    fn resolve(&self, raw: &str) -> String;
}

/// Default policy: trim and lowercase. Case-insensitive but
/// accent-sensitive, so "Tolisso" and "tolisso" agree while "Cherki" and
/// "Chérki" do not; anything fuzzier belongs in an upstream resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldResolver;

impl NameResolver for CaseFoldResolver {
    fn resolve(&self, raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_fold_trims_and_lowercases() {
        let resolver = CaseFoldResolver;
        assert_eq!(resolver.resolve("  Alexandre Lacazette "), "alexandre lacazette");
        assert_eq!(resolver.resolve("CHERKI"), "cherki");
    }

    #[test]
    fn case_fold_keeps_accents() {
        let resolver = CaseFoldResolver;
        assert_ne!(resolver.resolve("Chérki"), resolver.resolve("Cherki"));
    }
}
