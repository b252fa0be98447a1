use serde::Serialize;

use super::expression::is_satisfied;

/// Licenses compatible with GPL-2.0-or-later distribution.
pub const GPL2_COMPATIBLE: &[&str] = &[
    "BSD",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-like",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "CC0-1.0",
    "GPL-2.0-or-later",
    "ISC",
    "MIT",
    "MIT/X11",
    "Public Domain",
    "Unlicense",
    "WTFPL",
];

/// Permissive licenses that are fine unless `--gpl2` is requested.
pub const OSS_EXTRA: &[&str] = &["Apache-2.0"];

/// Licenses accepted for one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowList {
    licenses: Vec<String>,
}

impl AllowList {
    /// `base`, plus `extra` unless running in strict mode.
    pub fn build(base: &[String], extra: &[String], strict: bool) -> Self {
        let mut licenses: Vec<String> = base.to_vec();
        if !strict {
            for license in extra {
                if !licenses.contains(license) {
                    licenses.push(license.clone());
                }
            }
        }
        Self { licenses }
    }

    /// True when any allowed license satisfies the declared expression.
    pub fn permits(&self, declared: Option<&str>) -> bool {
        self.licenses
            .iter()
            .any(|allowed| is_satisfied(allowed, declared))
    }

    pub fn licenses(&self) -> &[String] {
        &self.licenses
    }
}

pub fn default_base() -> Vec<String> {
    GPL2_COMPATIBLE.iter().map(|s| s.to_string()).collect()
}

pub fn default_extra() -> Vec<String> {
    OSS_EXTRA.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_list(strict: bool) -> AllowList {
        AllowList::build(&default_base(), &default_extra(), strict)
    }

    #[test]
    fn test_apache_depends_on_strict_mode() {
        assert!(default_list(false).permits(Some("Apache-2.0")));
        assert!(!default_list(true).permits(Some("Apache-2.0")));
    }

    #[test]
    fn test_base_licenses_always_allowed() {
        for strict in [true, false] {
            let list = default_list(strict);
            assert!(list.permits(Some("MIT")));
            assert!(list.permits(Some("Public Domain")));
            assert!(list.permits(Some("GPL-2.0-or-later")));
        }
    }

    #[test]
    fn test_compound_with_one_allowed_operand() {
        let list = default_list(true);
        assert!(list.permits(Some("(GPL-3.0 OR MIT)")));
        assert!(!list.permits(Some("(GPL-3.0 OR Apache-2.0)")));
    }

    #[test]
    fn test_unknown_license_never_permitted() {
        assert!(!default_list(false).permits(None));
        assert!(!default_list(false).permits(Some("GPL-3.0")));
    }

    #[test]
    fn test_extra_not_duplicated() {
        let base = vec!["MIT".to_string()];
        let extra = vec!["MIT".to_string(), "Apache-2.0".to_string()];
        let list = AllowList::build(&base, &extra, false);
        assert_eq!(list.licenses().to_vec(), ["MIT", "Apache-2.0"]);
    }
}
