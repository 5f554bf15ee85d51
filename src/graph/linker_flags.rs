//! Linker flag scanning.
//!
//! Build settings often link frameworks and libraries directly through
//! linker flags instead of declaring a target dependency. Two token
//! shapes are recognised:
//!
//! - `-framework <Name>`: two tokens, the framework name as-is
//! - `-l<name>`: one token, the library name concatenated
//!
//! Anything else is skipped.

/// A dependency inferred from linker flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplicitDependency<'a> {
    /// `-framework <Name>`
    Framework(&'a str),
    /// `-l<name>`, bare library name without prefix or extension
    Library(&'a str),
}

const FRAMEWORK_FLAG: &str = "-framework";
const LIBRARY_PREFIX: &str = "-l";

/// Scans whitespace-separated linker flags for implicit dependencies.
///
/// A `-framework` followed by another flag, or at the end of the string,
/// is ignored.
///
/// # Example
///
/// ```
/// use targetscope::graph::linker_flags::{parse_linker_flags, ImplicitDependency};
///
/// let deps = parse_linker_flags("$(inherited) -ObjC -framework UIKit -lsqlite3");
/// assert_eq!(
///     deps,
///     vec![ImplicitDependency::Framework("UIKit"), ImplicitDependency::Library("sqlite3")]
/// );
/// ```
pub fn parse_linker_flags(raw: &str) -> Vec<ImplicitDependency<'_>> {
    let mut dependencies = Vec::new();
    let mut tokens = raw.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        if token == FRAMEWORK_FLAG {
            if let Some(name) = tokens.next_if(|next| !next.starts_with('-')) {
                dependencies.push(ImplicitDependency::Framework(name));
            }
        } else if let Some(name) = token.strip_prefix(LIBRARY_PREFIX) {
            if !name.is_empty() {
                dependencies.push(ImplicitDependency::Library(name));
            }
        }
    }

    dependencies
}

/// Static library naming: `z` becomes `libz.a`.
pub fn static_library_name(name: &str) -> String {
    format!("lib{}.a", name)
}

/// Dynamic library naming: `z` becomes `libz.dylib`.
pub fn dynamic_library_name(name: &str) -> String {
    format!("lib{}.dylib", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_and_library() {
        assert_eq!(
            parse_linker_flags("-framework Foo -lBar"),
            vec![
                ImplicitDependency::Framework("Foo"),
                ImplicitDependency::Library("Bar"),
            ]
        );
    }

    #[test]
    fn test_empty_flags() {
        assert!(parse_linker_flags("").is_empty());
        assert!(parse_linker_flags("   \t\n").is_empty());
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(
            parse_linker_flags("-framework\tFoo\n  -lc++"),
            vec![
                ImplicitDependency::Framework("Foo"),
                ImplicitDependency::Library("c++"),
            ]
        );
    }

    #[test]
    fn test_dangling_framework_flag() {
        assert!(parse_linker_flags("-framework").is_empty());
    }

    #[test]
    fn test_framework_followed_by_flag() {
        // The library flag is still picked up on its own.
        assert_eq!(
            parse_linker_flags("-framework -lz"),
            vec![ImplicitDependency::Library("z")]
        );
    }

    #[test]
    fn test_bare_library_flag_ignored() {
        assert!(parse_linker_flags("-l").is_empty());
    }

    #[test]
    fn test_unrecognized_flags_ignored() {
        assert!(parse_linker_flags("-ObjC -all_load \"$(inherited)\" -weak_framework Foo").is_empty());
    }

    #[test]
    fn test_repeated_entries_reported_each_time() {
        assert_eq!(
            parse_linker_flags("-lz -lz"),
            vec![ImplicitDependency::Library("z"), ImplicitDependency::Library("z")]
        );
    }

    #[test]
    fn test_library_naming() {
        assert_eq!(static_library_name("Bar"), "libBar.a");
        assert_eq!(dynamic_library_name("Bar"), "libBar.dylib");
    }
}
