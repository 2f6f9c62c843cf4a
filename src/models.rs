/// Problems solved in one language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageUsage {
    pub solved: u64,
    pub name: String,
}

impl LanguageUsage {
    pub fn new(solved: u64, name: impl Into<String>) -> Self {
        Self {
            solved,
            name: name.into(),
        }
    }
}

/// Flat record of solved/total counters for one user.
///
/// The default value is the all-zero record used whenever the fetch fails.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct LeetCodeStats {
    pub total_solved: u64,
    pub total_questions: u64,
    pub global_rank: u64,
    pub easy_solved: u64,
    pub easy_total: u64,
    pub medium_solved: u64,
    pub medium_total: u64,
    pub hard_solved: u64,
    pub hard_total: u64,
    /// Sorted by `solved`, highest first.
    pub languages: Vec<LanguageUsage>,
}

impl LeetCodeStats {
    /// Languages with the most solved problems, at most `n` of them.
    pub fn top_languages(&self, n: usize) -> &[LanguageUsage] {
        &self.languages[..self.languages.len().min(n)]
    }
}

/// Sort descending by solved count. Stable, so ties keep their input order.
pub fn sort_languages(languages: &mut [LanguageUsage]) {
    languages.sort_by(|a, b| b.solved.cmp(&a.solved));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = LeetCodeStats::default();
        assert_eq!(stats.total_solved, 0);
        assert_eq!(stats.global_rank, 0);
        assert_eq!(stats.hard_total, 0);
        assert!(stats.languages.is_empty());
    }

    #[test]
    fn test_sort_languages_descending_and_stable() {
        let mut langs = vec![
            LanguageUsage::new(3, "Java"),
            LanguageUsage::new(10, "Python3"),
            LanguageUsage::new(3, "C++"),
            LanguageUsage::new(7, "Rust"),
        ];
        sort_languages(&mut langs);

        let names: Vec<&str> = langs.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Python3", "Rust", "Java", "C++"]);
    }

    #[test]
    fn test_top_languages_caps_at_available() {
        let mut stats = LeetCodeStats::default();
        assert!(stats.top_languages(3).is_empty());

        stats.languages = vec![LanguageUsage::new(2, "Go"), LanguageUsage::new(1, "C")];
        assert_eq!(stats.top_languages(3).len(), 2);
        assert_eq!(stats.top_languages(1)[0].name, "Go");
    }
}
